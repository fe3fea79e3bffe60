//! OQPSK chip-to-sample modulator (`spec.md` §4.6): spreads the frame
//! over both channels, pulse-shapes each chip, applies the mandated
//! `Tc/2` I/Q offset, then normalizes and rotates the constellation.

use core::f32::consts::FRAC_1_SQRT_2;

use num_complex::Complex32;

use crate::constants::{
    BITS_PER_CHANNEL, CHIPS_PER_BIT, CHIPS_PER_CHANNEL, MIN_SPS, PREAMBLE_LEN_BITS,
    TRANSMITTED_LEN_BITS,
};
use crate::error::CoreError;
use crate::frame::Frame;
use crate::prn::{PrnChannel, PrnGenerator, PrnMode};

/// A pulse-shaping strategy mapping sample `n` of a chip's `sps`-sample
/// window to its weight. `spec.md` §9 Open Questions leaves RRC shaping
/// undecided and recommends "a configurable strategy, default to
/// half-sine"; this trait is that seam. RRC itself is not implemented
/// here — it remains a Non-goal — only the extension point is.
pub trait PulseShape {
    /// Weight of sample `n` (`0..sps`) within one chip's window.
    fn weight(&self, n: usize, sps: usize) -> f32;
}

/// The pulse shape T.018 mandates and this crate implements:
/// `p[n] = sin(pi * n / sps)`, occupying chip `k`'s samples
/// `[k*sps, (k+1)*sps)` with no overlap between chips (`spec.md` §4.6).
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfSine;

impl PulseShape for HalfSine {
    fn weight(&self, n: usize, sps: usize) -> f32 {
        libm::sinf(core::f32::consts::PI * n as f32 / sps as f32)
    }
}

/// Spreads, offset-keys and pulse-shapes a 252-bit frame into complex
/// baseband samples.
pub struct OqpskModulator<P: PulseShape = HalfSine> {
    pulse: P,
    mode: PrnMode,
}

impl Default for OqpskModulator<HalfSine> {
    fn default() -> Self {
        Self::new()
    }
}

impl OqpskModulator<HalfSine> {
    /// A modulator using the mandated half-sine pulse and the Normal
    /// PRN initial states — the configuration every on-air burst uses.
    pub fn new() -> Self {
        Self {
            pulse: HalfSine,
            mode: PrnMode::Normal,
        }
    }
}

impl<P: PulseShape> OqpskModulator<P> {
    /// Swaps in a different pulse-shaping strategy, keeping the Normal
    /// PRN mode.
    pub fn with_pulse_shape(pulse: P) -> Self {
        Self {
            pulse,
            mode: PrnMode::Normal,
        }
    }

    /// Selects the PRN initial-state pair (`spec.md` §4.3): `Normal`
    /// for an on-air burst, `SelfTest` to produce a burst a demodulator
    /// chain can validate against without transmitting a live frame.
    pub fn with_mode(mut self, mode: PrnMode) -> Self {
        self.mode = mode;
        self
    }

    /// Modulates one 252-bit frame into `buf`, returning the number of
    /// complex samples written. `sps` is the caller-chosen oversampling
    /// factor (samples per chip, `>= 8`); `buf` must hold at least
    /// `38_400 * sps` complex samples (`spec.md` §4.6, §6).
    ///
    /// Runs the PRN self-check (`spec.md` §4.3/§5's "hard gate") before
    /// writing a single sample, rejects an `sps` below the mandated
    /// minimum (`spec.md` §4.6/§6: "integer >= 8"), and checks the
    /// buffer length before any write, per `spec.md` §7's
    /// `BufferTooSmall` propagation policy. `sps = 0` would otherwise
    /// divide by zero inside the half-sine pulse shape and produce NaN
    /// samples without ever touching `BufferTooSmall`, since a zero `sps`
    /// trivially satisfies any buffer-length check.
    pub fn modulate_frame(
        &self,
        frame: &Frame,
        sps: u32,
        buf: &mut [Complex32],
    ) -> Result<usize, CoreError> {
        PrnGenerator::self_check()?;
        if sps < MIN_SPS {
            return Err(CoreError::InvalidSps { got: sps, min: MIN_SPS });
        }

        let sps = sps as usize;
        let required = CHIPS_PER_CHANNEL * sps;
        if buf.len() < required {
            return Err(CoreError::BufferTooSmall {
                required,
                got: buf.len(),
            });
        }

        let (i_bits, q_bits) = demux(frame);

        let mut prn = PrnGenerator::new(self.mode);
        let i_chips = spread(&mut prn, PrnChannel::I, &i_bits);
        let q_chips = spread(&mut prn, PrnChannel::Q, &q_bits);

        let out = &mut buf[..required];
        for s in out.iter_mut() {
            *s = Complex32::new(0.0, 0.0);
        }

        // I starts at sample 0; each chip occupies a non-overlapping
        // `sps`-sample window.
        for (k, &chip) in i_chips.iter().enumerate() {
            let base = k * sps;
            for n in 0..sps {
                let idx = base + n;
                if idx >= required {
                    break;
                }
                out[idx].re = chip as f32 * self.pulse.weight(n, sps);
            }
        }

        // Q lags I by `Tc/2` (`q_delay` samples): its first chip's
        // window starts at `-q_delay` and samples before 0 are
        // discarded (`spec.md` §4.6 "OQPSK offset").
        let q_delay = sps / 2;
        for (k, &chip) in q_chips.iter().enumerate() {
            let base = k * sps;
            for n in 0..sps {
                let signed = base as isize + n as isize - q_delay as isize;
                if signed < 0 {
                    continue;
                }
                let idx = signed as usize;
                if idx >= required {
                    break;
                }
                out[idx].im = chip as f32 * self.pulse.weight(n, sps);
            }
        }

        // Power normalization by 1/sqrt(2), then constellation rotation
        // by exp(j*pi/4) — in that order (`spec.md` §4.6 "Post-processing").
        let rotation = Complex32::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        for s in out.iter_mut() {
            *s = (*s * FRAC_1_SQRT_2) * rotation;
        }

        Ok(required)
    }
}

/// Splits the 300-bit transmitted sequence (preamble, all zero, then the
/// 252-bit frame) by position parity: even indices feed I, odd indices
/// feed Q, 150 bits each (`spec.md` §4.6 "Channel split").
fn demux(frame: &Frame) -> ([u8; BITS_PER_CHANNEL], [u8; BITS_PER_CHANNEL]) {
    let mut transmitted = [0u8; TRANSMITTED_LEN_BITS];
    transmitted[PREAMBLE_LEN_BITS..].copy_from_slice(frame);

    let mut i_bits = [0u8; BITS_PER_CHANNEL];
    let mut q_bits = [0u8; BITS_PER_CHANNEL];
    let mut i_n = 0usize;
    let mut q_n = 0usize;
    for (idx, &bit) in transmitted.iter().enumerate() {
        if idx % 2 == 0 {
            i_bits[i_n] = bit;
            i_n += 1;
        } else {
            q_bits[q_n] = bit;
            q_n += 1;
        }
    }
    debug_assert_eq!(i_n, BITS_PER_CHANNEL);
    debug_assert_eq!(q_n, BITS_PER_CHANNEL);
    (i_bits, q_bits)
}

/// Spreads 150 data bits into 38,400 chips: bit `1` inverts the 256-chip
/// PRN burst, bit `0` passes it through (`spec.md` §4.6 "Spreading",
/// and §9's resolved spreading-polarity convention).
fn spread(
    prn: &mut PrnGenerator,
    channel: PrnChannel,
    bits: &[u8; BITS_PER_CHANNEL],
) -> [i8; CHIPS_PER_CHANNEL] {
    let mut chips = [0i8; CHIPS_PER_CHANNEL];
    let mut burst = [0i8; CHIPS_PER_BIT];
    for (j, &bit) in bits.iter().enumerate() {
        prn.generate(channel, &mut burst);
        let out = &mut chips[j * CHIPS_PER_BIT..(j + 1) * CHIPS_PER_BIT];
        for (o, &c) in out.iter_mut().zip(burst.iter()) {
            *o = if bit == 1 { -c } else { c };
        }
    }
    chips
}

/// Free-function form matching `spec.md` §6's external interface
/// exactly: `modulate_frame(frame, sps, &mut buf) -> n_samples`, using
/// the mandated half-sine pulse and Normal PRN mode.
pub fn modulate_frame(frame: &Frame, sps: u32, buf: &mut [Complex32]) -> Result<usize, CoreError> {
    OqpskModulator::new().modulate_frame(frame, sps, buf)
}
