//! The 48-bit rotating field at information bits 155..202 (`spec.md`
//! §4.5): a 4-bit kind code plus a 44-bit payload whose meaning depends
//! on that code.

use crate::bits::{Bit, BitWriter};
use crate::config::{CoreState, RotatingFieldKind, TestMode};
use crate::constants::{
    G008_ELAPSED_HOURS_MAX, G008_MINUTES_SINCE_FIX_MAX, ROTATING_FIELD_KIND_LEN_BITS,
    ROTATING_FIELD_PAYLOAD_LEN_BITS,
};
use crate::error::{ConfigError, CoreError};
use crate::position::PositionCodec;

pub const ROTATING_FIELD_LEN_BITS: usize =
    ROTATING_FIELD_KIND_LEN_BITS + ROTATING_FIELD_PAYLOAD_LEN_BITS;

/// UTC instant supplied by the caller for the ELT-DT rotating-field
/// variant (`spec.md` §6: "current wall time... only when RotatingField
/// kind = ELT-DT"). Day-of-month, not day-of-year, per T.018.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcClock {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl UtcClock {
    /// Builds a clock from a `chrono` UTC timestamp, matching the
    /// teacher's convention of accepting `chrono` types at time-bearing
    /// API boundaries.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
        }
    }
}

/// Inputs needed to fill the rotating field, beyond the resolved
/// `RotatingFieldKind` itself.
pub struct RotatingFieldInputs<'a> {
    pub test_mode: TestMode,
    pub altitude_m: f64,
    pub core_state: &'a CoreState,
    /// Required (and only consulted) for `RotatingFieldKind::EltDt`.
    pub utc_clock: Option<UtcClock>,
    /// Required (and only consulted) for `RotatingFieldKind::Rls`.
    pub rls_provider_id: u8,
    pub rls_payload: u64,
    /// Required (and only consulted) for `RotatingFieldKind::Cancel`.
    pub cancel_method: u8,
}

/// Fills the rotating-field slot for one of the four T.018 variants.
pub struct RotatingField;

impl RotatingField {
    /// Fails with [`CoreError::ConfigOutOfRange`] (wrapping
    /// [`ConfigError::MissingUtcClockForEltDt`]) when `kind` is
    /// `EltDt` and `inputs.utc_clock` is `None`, rather than panicking —
    /// `BeaconConfig::validate` checks this same condition up front, but
    /// this encoder is the last line of defense for a caller that built a
    /// frame without validating first (`spec.md` §7: every error kind is
    /// "surfaced to the caller as typed failures").
    pub fn encode(
        kind: RotatingFieldKind,
        inputs: &RotatingFieldInputs,
    ) -> Result<[Bit; ROTATING_FIELD_LEN_BITS], CoreError> {
        let mut field = [0u8; ROTATING_FIELD_LEN_BITS];
        let mut w = BitWriter::new(&mut field);
        w.write_uint(0, ROTATING_FIELD_KIND_LEN_BITS, kind.code() as u64);

        let payload_offset = ROTATING_FIELD_KIND_LEN_BITS;
        match kind {
            RotatingFieldKind::G008 => encode_g008(&mut w, payload_offset, inputs),
            RotatingFieldKind::EltDt => encode_elt_dt(&mut w, payload_offset, inputs)?,
            RotatingFieldKind::Rls => encode_rls(&mut w, payload_offset, inputs),
            RotatingFieldKind::Cancel => encode_cancel(&mut w, payload_offset, inputs),
        }
        Ok(field)
    }
}

fn encode_g008(w: &mut BitWriter, offset: usize, inputs: &RotatingFieldInputs) {
    let elapsed_hours = inputs
        .core_state
        .elapsed_activation_hours
        .min(G008_ELAPSED_HOURS_MAX);
    let minutes_since_fix = inputs
        .core_state
        .minutes_since_last_fix
        .min(G008_MINUTES_SINCE_FIX_MAX);
    let altitude_code = PositionCodec::encode_altitude(inputs.altitude_m);

    w.write_uint(offset, 6, elapsed_hours as u64);
    w.write_uint(offset + 6, 11, minutes_since_fix as u64);
    w.write_uint(offset + 17, 10, altitude_code as u64);

    if inputs.test_mode == TestMode::Test {
        let bits = test_lfsr_bits(inputs.core_state.transmission_count);
        w.write_bits(offset + 27, &bits);
    }
    // else: the remaining 17 bits stay zero (BitWriter zero-initializes).
}

fn encode_elt_dt(w: &mut BitWriter, offset: usize, inputs: &RotatingFieldInputs) -> Result<(), CoreError> {
    let clock = inputs
        .utc_clock
        .ok_or(CoreError::ConfigOutOfRange(ConfigError::MissingUtcClockForEltDt))?;
    let packed_time = ((clock.day as u32 & 0x1F) << 11)
        | ((clock.hour as u32 & 0x1F) << 6)
        | (clock.minute as u32 & 0x3F);
    let altitude_code = PositionCodec::encode_altitude(inputs.altitude_m);

    w.write_uint(offset, 16, packed_time as u64);
    w.write_uint(offset + 16, 10, altitude_code as u64);
    // remaining 18 bits stay zero
    Ok(())
}

fn encode_rls(w: &mut BitWriter, offset: usize, inputs: &RotatingFieldInputs) {
    w.write_uint(offset, 8, inputs.rls_provider_id as u64);
    w.write_uint(offset + 8, 36, inputs.rls_payload & ((1u64 << 36) - 1));
}

fn encode_cancel(w: &mut BitWriter, offset: usize, inputs: &RotatingFieldInputs) {
    w.write_uint(offset, 2, (inputs.cancel_method & 0b11) as u64);
    w.write_ones(offset + 2, 42);
}

/// 8-bit LFSR, polynomial `x^8 + x^4 + x^3 + x^2 + 1` (taps on bits
/// 0/2/3/4), seeded by the burst counter. Used only to scramble the
/// unused G008 payload bits when `test_mode == Test` (`spec.md` §4.5).
fn test_lfsr_bits(seed: u32) -> [Bit; 17] {
    let mut state = (seed & 0xFF) as u8;
    let mut bits = [0u8; 17];
    for slot in bits.iter_mut() {
        let out = state & 1;
        let feedback = (state & 1) ^ ((state >> 2) & 1) ^ ((state >> 3) & 1) ^ ((state >> 4) & 1);
        state = (state >> 1) | (feedback << 7);
        *slot = out;
    }
    bits
}
