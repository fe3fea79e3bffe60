use core::fmt;

/// Error taxonomy for the signal-generation core. Every kind is
/// unrecoverable within the core: there is no internal retry, and
/// nothing is logged on the failure path. Diagnostics and recovery are
/// the caller's concern.
#[derive(Debug, PartialEq, Eq)]
pub enum CoreError {
    /// The PRN self-check (T.018 Table 2.2) did not reproduce the
    /// reference chip sequence at startup. Fatal: no bursts are
    /// produced while this holds.
    PrnSelfCheckFailed { expect: u64, got: u64 },

    /// `bch_verify` failed on a frame this crate just built. Indicates
    /// an encoder bug; this should never be observed outside a debug
    /// build's assertion.
    BchInvariantBroken,

    /// A `BeaconConfig` field lies outside its defined range.
    ConfigOutOfRange(ConfigError),

    /// The caller-supplied sample buffer cannot hold a full burst.
    BufferTooSmall { required: usize, got: usize },

    /// `sps` is below the minimum oversampling factor `spec.md` §4.6/§6
    /// mandates. Surfaced before any sample is written.
    InvalidSps { got: u32, min: u32 },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::PrnSelfCheckFailed { expect, got } => write!(
                f,
                "PRN self-check failed: expected reference chips 0x{expect:016x}, got 0x{got:016x}"
            ),
            CoreError::BchInvariantBroken => {
                f.write_str("BCH parity of a freshly built frame failed to verify")
            },
            CoreError::ConfigOutOfRange(e) => write!(f, "beacon config out of range: {e}"),
            CoreError::BufferTooSmall { required, got } => write!(
                f,
                "sample buffer too small: need {required} complex samples, got {got}"
            ),
            CoreError::InvalidSps { got, min } => {
                write!(f, "sps {got} is below the minimum oversampling factor of {min}")
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::ConfigOutOfRange(e)
    }
}

/// Which `BeaconConfig` field was out of its defined range, and why.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    CountryCodeOutOfRange { got: u16 },
    SerialNumberOutOfRange { got: u32 },
    LatitudeOutOfRange { got_millidegrees: i64 },
    LongitudeOutOfRange { got_millidegrees: i64 },

    /// `resolved_rotating_field_kind() == RotatingFieldKind::EltDt` but
    /// `utc_clock` is `None`. The ELT-DT rotating field has no content
    /// without a UTC reading (`spec.md` §6: "current wall time... only
    /// when RotatingField kind = ELT-DT").
    MissingUtcClockForEltDt,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CountryCodeOutOfRange { got } => {
                write!(f, "country_code {got} is outside [0, 1023]")
            },
            ConfigError::SerialNumberOutOfRange { got } => {
                write!(f, "serial_number {got} is outside [0, 16383]")
            },
            ConfigError::LatitudeOutOfRange { got_millidegrees } => write!(
                f,
                "latitude {} is outside [-90, 90] degrees",
                *got_millidegrees as f64 / 1000.0
            ),
            ConfigError::LongitudeOutOfRange { got_millidegrees } => write!(
                f,
                "longitude {} is outside [-180, 180] degrees",
                *got_millidegrees as f64 / 1000.0
            ),
            ConfigError::MissingUtcClockForEltDt => f.write_str(
                "rotating-field kind resolves to ELT-DT but no utc_clock was supplied",
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
