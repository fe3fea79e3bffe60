//! Deterministic 23-bit LFSR PRN (DSSS spreading) generator (`spec.md`
//! §4.3).

use crate::constants::{
    PRN_NORMAL_I_INIT, PRN_NORMAL_Q_OFFSET_STEPS, PRN_SELFTEST_I_INIT, PRN_SELFTEST_Q_INIT,
    PRN_TABLE_2_2_REFERENCE,
};
use crate::error::CoreError;

const REGISTER_MASK: u32 = (1 << 23) - 1;
const TAP_18: u32 = 18;

/// Which of the two independently evolving LFSR channels to draw chips
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrnChannel {
    I,
    Q,
}

/// Operating mode selector. `SelfTest` uses a second, fixed pair of
/// initial states used only to validate a demodulator chain; it carries
/// no relation to `PrnChannel::self_check`, which validates this
/// generator itself against T.018 Table 2.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrnMode {
    Normal,
    SelfTest,
}

/// Advances a 23-stage Fibonacci LFSR (polynomial `x^23 + x^18 + 1`) one
/// step: shift right, feedback `stage0 XOR stage18` injected into
/// stage22. Returns the chip sampled from stage0 *before* the shift.
fn step(state: &mut u32) -> bool {
    let out_bit = *state & 1 != 0;
    let feedback = (*state & 1) ^ ((*state >> TAP_18) & 1);
    *state = (*state >> 1) | (feedback << 22);
    *state &= REGISTER_MASK;
    out_bit
}

/// Logic bit `1` sequences a `-1` chip; logic bit `0` sequences `+1`.
fn bit_to_chip(bit: bool) -> i8 {
    if bit {
        -1
    } else {
        1
    }
}

/// Two independently evolving 23-bit LFSRs, one per channel, produced
/// from the fixed T.018 Table 2.2 initial states.
pub struct PrnGenerator {
    lfsr_i: u32,
    lfsr_q: u32,
}

impl PrnGenerator {
    /// Builds a generator for `mode`. The Normal/Q initial state is
    /// derived by running the Normal/I LFSR for
    /// [`PRN_NORMAL_Q_OFFSET_STEPS`] cycles, per T.018 Table 2.2's
    /// "64-chip offset" property (`spec.md` §4.3) — this sidesteps the
    /// two conflicting hardcoded Normal/Q constants the source carries
    /// (`spec.md` §9 Open Questions).
    pub fn new(mode: PrnMode) -> Self {
        match mode {
            PrnMode::Normal => {
                let mut lfsr_q = PRN_NORMAL_I_INIT & REGISTER_MASK;
                for _ in 0..PRN_NORMAL_Q_OFFSET_STEPS {
                    step(&mut lfsr_q);
                }
                Self {
                    lfsr_i: PRN_NORMAL_I_INIT & REGISTER_MASK,
                    lfsr_q,
                }
            },
            PrnMode::SelfTest => Self {
                lfsr_i: PRN_SELFTEST_I_INIT & REGISTER_MASK,
                lfsr_q: PRN_SELFTEST_Q_INIT & REGISTER_MASK,
            },
        }
    }

    /// Advances `channel`'s LFSR `out.len()` times, writing one `{-1,
    /// +1}` chip per step. The register's state is preserved across
    /// calls — a channel's sequence is one continuous run per burst, not
    /// reset per data bit (`spec.md` §4.3).
    pub fn generate(&mut self, channel: PrnChannel, out: &mut [i8]) {
        let state = match channel {
            PrnChannel::I => &mut self.lfsr_i,
            PrnChannel::Q => &mut self.lfsr_q,
        };
        for slot in out.iter_mut() {
            *slot = bit_to_chip(step(state));
        }
    }

    /// Hard gate mandated by `spec.md` §4.3: the first 64 chips of the
    /// Normal/I sequence, packed MSB-first with bit = 1 iff chip == -1,
    /// must equal the T.018 Table 2.2 reference. Implementations must
    /// refuse to produce any burst if this fails; `OqpskModulator`
    /// calls this before writing a single sample.
    pub fn self_check() -> Result<(), CoreError> {
        let mut state = PRN_NORMAL_I_INIT & REGISTER_MASK;
        let mut packed: u64 = 0;
        for _ in 0..64 {
            let bit = step(&mut state);
            packed = (packed << 1) | bit as u64;
        }
        if packed == PRN_TABLE_2_2_REFERENCE {
            Ok(())
        } else {
            Err(CoreError::PrnSelfCheckFailed {
                expect: PRN_TABLE_2_2_REFERENCE,
                got: packed,
            })
        }
    }
}
