#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

//! Signal-generation core for a COSPAS-SARSAT T.018 "second generation"
//! distress beacon: assembles the 252-bit logical frame (BCH(250,202)
//! parity included), spreads it with the two 23-stage PRN sequences the
//! standard mandates, and modulates the result onto an OQPSK baseband
//! waveform.
//!
//! This crate only builds the waveform. It does not demodulate, decode,
//! drive an SDR, schedule inter-burst timing, or acquire a GPS fix —
//! those are the surrounding application's job. See the crate's
//! `DESIGN.md` for the full module-by-module rationale.
//!
//! ```
//! use sarsat_t018_core::{
//!     BeaconConfig, BeaconType, CoreState, FrameBuilder, Position, TestMode, VesselId,
//! };
//!
//! let config = BeaconConfig {
//!     beacon_type: BeaconType::Epirb,
//!     country_code: 227,
//!     tac_number: 1234,
//!     serial_number: 13398,
//!     test_mode: TestMode::Test,
//!     position: Position {
//!         latitude_deg: 43.2,
//!         longitude_deg: 5.4,
//!         altitude_m: 1500.0,
//!         valid: true,
//!     },
//!     vessel_id: VesselId::Mmsi { mmsi: 227_000_111, ais_identity: 0 },
//!     rotating_field_kind: None,
//!     utc_clock: None,
//!     rls_provider_id: 0,
//!     rls_payload: 0,
//!     cancel_method: 0,
//! };
//! config.validate().unwrap();
//! let frame = FrameBuilder::build_frame(&config, &CoreState::default()).unwrap();
//! assert_eq!(frame.len(), 252);
//! ```

pub use crate::{
    bch::BchCodec,
    config::{BeaconConfig, BeaconType, CoreState, Position, RotatingFieldKind, TestMode, VesselId},
    error::{ConfigError, CoreError},
    frame::{Frame, FrameBuilder},
    position::PositionCodec,
    prn::{PrnChannel, PrnGenerator, PrnMode},
    rotating_field::{RotatingField, RotatingFieldInputs, UtcClock},
};

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use crate::sigmf::SigmfMeta;

pub use crate::modulator::{modulate_frame, HalfSine, OqpskModulator, PulseShape};

mod bch;
mod bits;
mod config;
pub mod constants;
mod error;
mod frame;
mod modulator;
mod position;
mod prn;
mod rotating_field;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod sigmf;
