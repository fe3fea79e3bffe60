//! Typed description of the SigMF companion-file sidecar (`spec.md` §6).
//!
//! The file writer that actually persists a capture is explicitly out of
//! scope (`spec.md` §1): this module only pins the metadata contract it
//! needs to a type, instead of leaving `sample_rate` / `datatype` /
//! `capture_time` as an implicit string-keyed agreement between the core
//! and that external collaborator.

use chrono::{DateTime, Utc};

use crate::constants::CHIP_RATE_HZ;

/// Fields `spec.md` §6 names for the `.sigmf-data` JSON sidecar:
/// `sample_rate`, `datatype = "cf32_le"`, and an ISO-8601 UTC capture
/// timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmfMeta {
    pub sample_rate_hz: u32,
    pub datatype: &'static str,
    pub capture_time: DateTime<Utc>,
}

impl SigmfMeta {
    /// Builds the sidecar metadata for a burst modulated at `sps`
    /// (`spec.md` §6: sample rate = `sps * 38_400` Hz, datatype is
    /// always interleaved little-endian complex float32).
    pub fn for_burst(sps: u32, capture_time: DateTime<Utc>) -> Self {
        Self {
            sample_rate_hz: sps * CHIP_RATE_HZ,
            datatype: "cf32_le",
            capture_time,
        }
    }
}
