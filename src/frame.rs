//! Frame assembly: the 202-bit information block, BCH parity and the
//! 2-bit header (`spec.md` §4.4).

use crate::bch::BchCodec;
use crate::bits::BitWriter;
use crate::config::{BeaconConfig, CoreState, VesselId};
use crate::constants::{
    BCH_INFO_LEN_BITS, BCH_PARITY_LEN_BITS, FRAME_LEN_BITS, HEADER_LEN_BITS, INFO_OFFSET,
    PARITY_OFFSET,
};
use crate::error::CoreError;
use crate::position::PositionCodec;
use crate::rotating_field::{RotatingField, RotatingFieldInputs};

pub type Frame = [u8; FRAME_LEN_BITS];

/// Assembles a complete T.018 frame from a `BeaconConfig` and the
/// caller-owned burst state.
pub struct FrameBuilder;

impl FrameBuilder {
    /// Builds a frame: header, information block, rotating field and
    /// BCH parity. `config` should already have passed
    /// [`BeaconConfig::validate`] — but every way `validate` can fail
    /// (including a `RotatingFieldKind::EltDt` resolution with no
    /// `utc_clock`) is re-checked here and surfaced as the same typed
    /// [`CoreError`] rather than assumed, so a caller that skips
    /// `validate` gets a `Result`, never a panic.
    ///
    /// In debug builds the computed parity is re-verified against the
    /// information block before returning (`spec.md`'s BCH invariant);
    /// this can never fail for a crate-internal bug-free build and is
    /// guarded against, not expected, hence [`CoreError::BchInvariantBroken`]
    /// rather than a panic.
    pub fn build_frame(config: &BeaconConfig, state: &CoreState) -> Result<Frame, CoreError> {
        let mut frame = [0u8; FRAME_LEN_BITS];
        {
            let mut w = BitWriter::new(&mut frame);
            w.write_bit(0, config.test_mode.header_bit());
            w.write_bit(1, false);
            write_information_block(&mut w, config, state)?;
        }

        let info: [u8; BCH_INFO_LEN_BITS] = frame[INFO_OFFSET..PARITY_OFFSET].try_into().unwrap();
        let parity = BchCodec::compute(&info);
        frame[PARITY_OFFSET..PARITY_OFFSET + BCH_PARITY_LEN_BITS].copy_from_slice(&parity);

        if cfg!(debug_assertions) && !BchCodec::verify(&info, &parity) {
            return Err(CoreError::BchInvariantBroken);
        }
        Ok(frame)
    }
}

/// `spec.md` §4.4's field table, laid out at `INFO_OFFSET`-relative
/// T.018 bit position minus 1 (the table is 1-based).
fn write_information_block(
    w: &mut BitWriter,
    config: &BeaconConfig,
    state: &CoreState,
) -> Result<(), CoreError> {
    let base = INFO_OFFSET;

    let tac = if config.test_mode == crate::config::TestMode::Test {
        crate::constants::TEST_MODE_TAC
    } else {
        config.tac_number
    };
    w.write_uint(base, 16, tac as u64); // 1-16
    w.write_uint(base + 16, 14, (config.serial_number & 0x3FFF) as u64); // 17-30
    w.write_uint(base + 30, 10, config.country_code as u64); // 31-40
    w.write_bit(base + 40, false); // 41: homing-device status
    w.write_bit(base + 41, true); // 42: RLS capability
    w.write_bit(base + 42, config.test_mode.header_bit()); // 43: test-protocol flag

    let position_field = PositionCodec::encode(&config.position);
    w.write_bits(base + 43, &position_field); // 44-90 (23 + 24 bits)

    let (vessel_id_type, vessel_id_value): (u8, u32) = match config.vessel_id {
        VesselId::None => (0, 0),
        VesselId::Mmsi { mmsi, .. } => (1, mmsi & 0x3FFF_FFFF),
        VesselId::AircraftAddress(addr) => (2, addr & 0x00FF_FFFF),
    };
    w.write_uint(base + 90, 3, vessel_id_type as u64); // 91-93
    w.write_uint(base + 93, 30, vessel_id_value as u64); // 94-123

    let ais_identity = match config.vessel_id {
        VesselId::Mmsi { ais_identity, .. } => ais_identity,
        _ => 0,
    };
    w.write_uint(base + 123, 14, ais_identity as u64); // 124-137

    w.write_uint(base + 137, 3, config.beacon_type.ordinal() as u64); // 138-140
    w.write_ones(base + 140, 14); // 141-154: spare

    let rotating_inputs = RotatingFieldInputs {
        test_mode: config.test_mode,
        altitude_m: config.position.altitude_m,
        core_state: state,
        utc_clock: config.utc_clock,
        rls_provider_id: config.rls_provider_id,
        rls_payload: config.rls_payload,
        cancel_method: config.cancel_method,
    };
    let rotating_field = RotatingField::encode(config.resolved_rotating_field_kind(), &rotating_inputs)?;
    w.write_bits(base + 154, &rotating_field); // 155-202
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::read_uint;
    use crate::config::{BeaconType, Position, RotatingFieldKind, TestMode};

    fn sample_config() -> BeaconConfig {
        BeaconConfig {
            beacon_type: BeaconType::Epirb,
            country_code: 227,
            tac_number: 1234,
            serial_number: 13398,
            test_mode: TestMode::Test,
            position: Position {
                latitude_deg: 43.2,
                longitude_deg: 5.4,
                altitude_m: 1500.0,
                valid: true,
            },
            vessel_id: VesselId::Mmsi {
                mmsi: 227_000_111,
                ais_identity: 0,
            },
            rotating_field_kind: None,
            utc_clock: None,
            rls_provider_id: 0,
            rls_payload: 0,
            cancel_method: 0,
        }
    }

    #[test]
    fn header_carries_test_mode_then_zero() {
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&sample_config(), &state).unwrap();
        assert_eq!(frame[0], 1, "test mode sets bit 0");
        assert_eq!(frame[1], 0);
    }

    #[test]
    fn test_mode_substitutes_tac_9999() {
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&sample_config(), &state).unwrap();
        let tac = read_uint(&frame, INFO_OFFSET, 16);
        assert_eq!(tac, 9999);
    }

    #[test]
    fn exercise_mode_keeps_caller_tac() {
        let mut cfg = sample_config();
        cfg.test_mode = TestMode::Exercise;
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&cfg, &state).unwrap();
        let tac = read_uint(&frame, INFO_OFFSET, 16);
        assert_eq!(tac, 1234);
        assert_eq!(frame[0], 0);
    }

    #[test]
    fn parity_is_internally_consistent() {
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&sample_config(), &state).unwrap();
        let info: [u8; BCH_INFO_LEN_BITS] = frame[INFO_OFFSET..PARITY_OFFSET].try_into().unwrap();
        let parity: [u8; BCH_PARITY_LEN_BITS] =
            frame[PARITY_OFFSET..PARITY_OFFSET + BCH_PARITY_LEN_BITS]
                .try_into()
                .unwrap();
        assert!(BchCodec::verify(&info, &parity));
    }

    #[test]
    fn epirb_defaults_to_g008_rotating_field() {
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&sample_config(), &state).unwrap();
        let kind_code = read_uint(&frame, INFO_OFFSET + 154, 4);
        assert_eq!(kind_code, RotatingFieldKind::G008.code() as u64);
    }

    #[test]
    fn elt_dt_defaults_to_elt_dt_rotating_field() {
        let mut cfg = sample_config();
        cfg.beacon_type = BeaconType::EltDt;
        cfg.vessel_id = VesselId::AircraftAddress(0x00A1_B2C3);
        cfg.utc_clock = Some(crate::rotating_field::UtcClock {
            day: 3,
            hour: 14,
            minute: 7,
        });
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&cfg, &state).unwrap();
        let kind_code = read_uint(&frame, INFO_OFFSET + 154, 4);
        assert_eq!(kind_code, RotatingFieldKind::EltDt.code() as u64);
    }

    #[test]
    fn elt_dt_without_clock_is_rejected_not_panicked() {
        let mut cfg = sample_config();
        cfg.beacon_type = BeaconType::EltDt;
        cfg.utc_clock = None;

        assert_eq!(
            cfg.validate(),
            Err(crate::error::ConfigError::MissingUtcClockForEltDt)
        );

        let state = CoreState::default();
        let err = FrameBuilder::build_frame(&cfg, &state).unwrap_err();
        assert_eq!(
            err,
            CoreError::ConfigOutOfRange(crate::error::ConfigError::MissingUtcClockForEltDt)
        );
    }

    #[test]
    fn spare_field_is_all_ones() {
        let state = CoreState::default();
        let frame = FrameBuilder::build_frame(&sample_config(), &state).unwrap();
        for i in 0..14 {
            assert_eq!(frame[INFO_OFFSET + 140 + i], 1);
        }
    }
}
