//! Position and altitude encoding (`spec.md` §4.1).

use crate::bits::{read_uint, Bit, BitWriter};
use crate::config::Position;
use crate::constants::{ALTITUDE_CEILING_M, ALTITUDE_CODE_MAX, ALTITUDE_FLOOR_M, ALTITUDE_STEP_M};

pub const LATITUDE_LEN_BITS: usize = 23;
pub const LONGITUDE_LEN_BITS: usize = 24;
pub const POSITION_FIELD_LEN_BITS: usize = LATITUDE_LEN_BITS + LONGITUDE_LEN_BITS;

const FRAC_SCALE: f64 = 32768.0; // 2^15

/// Encodes GPS latitude/longitude/altitude into T.018 bit fields.
pub struct PositionCodec;

impl PositionCodec {
    /// Encodes `position` into a 47-bit field: 23 bits latitude followed
    /// by 24 bits longitude. An invalid position encodes to all zeros.
    pub fn encode(position: &Position) -> [Bit; POSITION_FIELD_LEN_BITS] {
        let mut field = [0u8; POSITION_FIELD_LEN_BITS];
        if position.valid {
            let mut w = BitWriter::new(&mut field);
            encode_latitude(&mut w, 0, position.latitude_deg);
            encode_longitude(&mut w, LATITUDE_LEN_BITS, position.longitude_deg);
        }
        field
    }

    /// Encodes altitude to the 10-bit T.018 code: floor -400 m, ceiling
    /// 15,952 m, 16 m/LSB, saturating at the low and high end. Value
    /// 1023 is reserved and is never returned by this function.
    pub fn encode_altitude(meters: f64) -> u16 {
        if meters <= ALTITUDE_FLOOR_M {
            return 0;
        }
        if meters > ALTITUDE_CEILING_M {
            return ALTITUDE_CODE_MAX;
        }
        let code = libm::round((meters - ALTITUDE_FLOOR_M) / ALTITUDE_STEP_M) as i64;
        code.clamp(0, ALTITUDE_CODE_MAX as i64) as u16
    }

    /// Test-only approximate round trip, used to property-test that
    /// `encode` stays within one quantization step of its input. This is
    /// not a public decode operation: the core is encode-only per
    /// `spec.md` §1 Non-goals.
    #[cfg(test)]
    fn decode_for_test(field: &[Bit; POSITION_FIELD_LEN_BITS]) -> (f64, f64) {
        let lat_sign = if field[0] == 1 { -1.0 } else { 1.0 };
        let lat_int = read_uint(field, 1, 7) as f64;
        let lat_frac = read_uint(field, 8, 15) as f64 / FRAC_SCALE;
        let lat = lat_sign * (lat_int + lat_frac);

        let lon_sign = if field[LATITUDE_LEN_BITS] == 1 { -1.0 } else { 1.0 };
        let lon_int = read_uint(field, LATITUDE_LEN_BITS + 1, 8) as f64;
        let lon_frac = read_uint(field, LATITUDE_LEN_BITS + 9, 15) as f64 / FRAC_SCALE;
        let lon = lon_sign * (lon_int + lon_frac);

        (lat, lon)
    }
}

fn encode_latitude(w: &mut BitWriter, offset: usize, lat_deg: f64) {
    let sign = lat_deg.is_sign_negative();
    let mag = lat_deg.abs().min(90.0);
    let int_part = libm::floor(mag) as u64;
    let frac_part = mag - libm::floor(mag);
    let frac = libm::round(frac_part * FRAC_SCALE).clamp(0.0, (1u64 << 15) as f64 - 1.0) as u64;
    w.write_bit(offset, sign);
    w.write_uint(offset + 1, 7, int_part);
    w.write_uint(offset + 8, 15, frac);
}

fn encode_longitude(w: &mut BitWriter, offset: usize, lon_deg: f64) {
    let sign = lon_deg.is_sign_negative();
    let mag = lon_deg.abs().min(180.0);
    let int_part = libm::floor(mag) as u64;
    let frac_part = mag - libm::floor(mag);
    let frac = libm::round(frac_part * FRAC_SCALE).clamp(0.0, (1u64 << 15) as f64 - 1.0) as u64;
    w.write_bit(offset, sign);
    w.write_uint(offset + 1, 8, int_part);
    w.write_uint(offset + 9, 15, frac);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_position_encodes_to_zero() {
        let field = PositionCodec::encode(&Position::INVALID);
        assert!(field.iter().all(|&b| b == 0));
    }

    #[test]
    fn valid_position_round_trips_within_one_lsb() {
        let pos = Position {
            latitude_deg: 43.2,
            longitude_deg: 5.4,
            altitude_m: 0.0,
            valid: true,
        };
        let field = PositionCodec::encode(&pos);
        let (lat, lon) = PositionCodec::decode_for_test(&field);
        assert!((lat - 43.2).abs() < 1e-3);
        assert!((lon - 5.4).abs() < 1e-3);
    }

    #[test]
    fn southern_western_hemisphere_sign_bits() {
        let pos = Position {
            latitude_deg: -33.5,
            longitude_deg: -70.25,
            altitude_m: 0.0,
            valid: true,
        };
        let field = PositionCodec::encode(&pos);
        assert_eq!(field[0], 1, "south sets the latitude sign bit");
        assert_eq!(field[LATITUDE_LEN_BITS], 1, "west sets the longitude sign bit");
    }

    #[test]
    fn altitude_saturates_at_floor_and_ceiling() {
        assert_eq!(PositionCodec::encode_altitude(-500.0), 0);
        assert_eq!(PositionCodec::encode_altitude(-400.0), 0);
        assert_eq!(PositionCodec::encode_altitude(20_000.0), 1022);
    }

    #[test]
    fn altitude_matches_scenario_3() {
        // 1500 m real altitude, scenario adds 400 m margin in the
        // rotating-field test: round(1900/16) = 119.
        assert_eq!(PositionCodec::encode_altitude(1500.0), 119);
    }

    #[test]
    fn altitude_never_returns_reserved_code() {
        for raw in (-2000..40_000).step_by(37) {
            let code = PositionCodec::encode_altitude(raw as f64);
            assert_ne!(code, 1023);
        }
    }
}
