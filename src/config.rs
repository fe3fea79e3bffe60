//! Caller-supplied beacon identity and position.

use crate::error::ConfigError;

/// Beacon equipment class, carried in information bits 138..140.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeaconType {
    Epirb,
    Plb,
    Elt,
    EltDt,
}

impl BeaconType {
    /// 3-bit ordinal written into information bits 138..140.
    pub(crate) const fn ordinal(self) -> u8 {
        match self {
            BeaconType::Plb => 0,
            BeaconType::Epirb => 1,
            BeaconType::Elt | BeaconType::EltDt => 2,
        }
    }

    /// The rotating-field kind this beacon type implies by default,
    /// absent an explicit override in `BeaconConfig::rotating_field_kind`.
    pub(crate) const fn default_rotating_field_kind(self) -> RotatingFieldKind {
        match self {
            BeaconType::EltDt => RotatingFieldKind::EltDt,
            BeaconType::Epirb | BeaconType::Plb | BeaconType::Elt => RotatingFieldKind::G008,
        }
    }
}

/// Exercise vs. live-test operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TestMode {
    Exercise,
    Test,
}

impl TestMode {
    pub(crate) const fn header_bit(self) -> bool {
        matches!(self, TestMode::Test)
    }
}

/// Which of the four rotating-field variants occupies frame bits
/// 155..202.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotatingFieldKind {
    G008,
    EltDt,
    Rls,
    Cancel,
}

impl RotatingFieldKind {
    /// 4-bit kind code written into information bits 155..158.
    pub(crate) const fn code(self) -> u8 {
        match self {
            RotatingFieldKind::G008 => 0,
            RotatingFieldKind::EltDt => 1,
            RotatingFieldKind::Rls => 2,
            RotatingFieldKind::Cancel => 3,
        }
    }
}

/// GPS-derived position, or an explicit "no fix" marker.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub valid: bool,
}

impl Position {
    /// The canonical "no position available" value: `valid = false`,
    /// every other field encodes to zero regardless of its contents.
    pub const INVALID: Position = Position {
        latitude_deg: 0.0,
        longitude_deg: 0.0,
        altitude_m: 0.0,
        valid: false,
    };
}

/// Vessel/aircraft identity carried in information bits 91..137.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VesselId {
    /// PLB: no vessel-ID type, no vessel-ID field.
    None,
    /// EPIRB: 30-bit MMSI, plus a 14-bit EPIRB-AIS identity.
    Mmsi { mmsi: u32, ais_identity: u16 },
    /// ELT / ELT-DT: 24-bit aircraft address in the low bits of the
    /// 30-bit vessel-ID field.
    AircraftAddress(u32),
}

/// Immutable per-burst beacon identity and position — the sole input to
/// `FrameBuilder::build_frame`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeaconConfig {
    pub beacon_type: BeaconType,
    pub country_code: u16,
    pub tac_number: u16,
    pub serial_number: u16,
    pub test_mode: TestMode,
    pub position: Position,
    pub vessel_id: VesselId,
    /// `None` selects the type-default rotating-field kind.
    pub rotating_field_kind: Option<RotatingFieldKind>,
    /// Current UTC wall-clock reading, consulted only when the resolved
    /// rotating-field kind is `EltDt`.
    pub utc_clock: Option<crate::rotating_field::UtcClock>,
    /// Consulted only when the resolved rotating-field kind is `Rls`.
    pub rls_provider_id: u8,
    pub rls_payload: u64,
    /// Consulted only when the resolved rotating-field kind is `Cancel`.
    pub cancel_method: u8,
}

impl BeaconConfig {
    /// The rotating-field kind this configuration resolves to.
    pub fn resolved_rotating_field_kind(&self) -> RotatingFieldKind {
        self.rotating_field_kind
            .unwrap_or_else(|| self.beacon_type.default_rotating_field_kind())
    }

    /// Validates the fields that define `ConfigOutOfRange` (altitude and
    /// the G008 elapsed counters are excluded: those saturate instead of
    /// being range-checked).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.country_code > 1023 {
            return Err(ConfigError::CountryCodeOutOfRange {
                got: self.country_code,
            });
        }
        if self.serial_number > 16383 {
            return Err(ConfigError::SerialNumberOutOfRange {
                got: self.serial_number as u32,
            });
        }
        if self.position.valid {
            if !(-90.0..=90.0).contains(&self.position.latitude_deg) {
                return Err(ConfigError::LatitudeOutOfRange {
                    got_millidegrees: (self.position.latitude_deg * 1000.0) as i64,
                });
            }
            if !(-180.0..=180.0).contains(&self.position.longitude_deg) {
                return Err(ConfigError::LongitudeOutOfRange {
                    got_millidegrees: (self.position.longitude_deg * 1000.0) as i64,
                });
            }
        }
        if self.resolved_rotating_field_kind() == RotatingFieldKind::EltDt && self.utc_clock.is_none()
        {
            return Err(ConfigError::MissingUtcClockForEltDt);
        }
        Ok(())
    }
}

/// Caller-owned state that persists across bursts: the monotonic
/// transmission counter and the RLS/G008 bookkeeping it feeds. There is
/// no crate-internal mutable global — the caller owns and threads this
/// through every call instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreState {
    /// Number of bursts transmitted so far, saturating at `u32::MAX`.
    pub transmission_count: u32,
    /// Elapsed activation time, hours (saturates at 63 in the G008
    /// field).
    pub elapsed_activation_hours: u8,
    /// Minutes since the last GPS fix (saturates at 2046 in the G008
    /// field).
    pub minutes_since_last_fix: u16,
}

impl CoreState {
    pub fn advance_burst(&mut self) {
        self.transmission_count = self.transmission_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rotating_field_kind_follows_beacon_type() {
        assert_eq!(
            BeaconType::EltDt.default_rotating_field_kind(),
            RotatingFieldKind::EltDt
        );
        assert_eq!(
            BeaconType::Epirb.default_rotating_field_kind(),
            RotatingFieldKind::G008
        );
    }

    #[test]
    fn validate_rejects_out_of_range_country_code() {
        let mut cfg = sample_config();
        cfg.country_code = 2000;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::CountryCodeOutOfRange { got: 2000 })
        );
    }

    #[test]
    fn validate_accepts_invalid_position_regardless_of_coordinates() {
        let mut cfg = sample_config();
        cfg.position = Position {
            latitude_deg: 999.0,
            longitude_deg: 999.0,
            altitude_m: 0.0,
            valid: false,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_elt_dt_without_utc_clock() {
        let mut cfg = sample_config();
        cfg.beacon_type = BeaconType::EltDt;
        cfg.utc_clock = None;
        assert_eq!(cfg.validate(), Err(ConfigError::MissingUtcClockForEltDt));

        cfg.utc_clock = Some(crate::rotating_field::UtcClock {
            day: 1,
            hour: 0,
            minute: 0,
        });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_ignores_missing_utc_clock_when_not_resolving_to_elt_dt() {
        let mut cfg = sample_config();
        cfg.beacon_type = BeaconType::Epirb;
        cfg.rotating_field_kind = Some(RotatingFieldKind::G008);
        cfg.utc_clock = None;
        assert!(cfg.validate().is_ok());
    }

    fn sample_config() -> BeaconConfig {
        BeaconConfig {
            beacon_type: BeaconType::Epirb,
            country_code: 227,
            tac_number: 123,
            serial_number: 13398,
            test_mode: TestMode::Test,
            position: Position {
                latitude_deg: 43.2,
                longitude_deg: 5.4,
                altitude_m: 0.0,
                valid: true,
            },
            vessel_id: VesselId::None,
            rotating_field_kind: None,
            utc_clock: None,
            rls_provider_id: 0,
            rls_payload: 0,
            cancel_method: 0,
        }
    }
}
