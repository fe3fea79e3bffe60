//! Fixed numeric constants of the T.018 air interface.

/// Total length of one T.018 logical frame, in bits.
pub const FRAME_LEN_BITS: usize = 252;

/// Width of the header (test/exercise bit + one padding bit).
pub const HEADER_LEN_BITS: usize = 2;

/// Width of the information block, in bits (frame positions 2..204).
pub const INFO_LEN_BITS: usize = 202;

/// Width of the BCH parity block, in bits (frame positions 204..252).
pub const PARITY_LEN_BITS: usize = 48;

/// Bit offset of the information block within the frame.
pub const INFO_OFFSET: usize = HEADER_LEN_BITS;

/// Bit offset of the parity block within the frame.
pub const PARITY_OFFSET: usize = HEADER_LEN_BITS + INFO_LEN_BITS;

/// T.018-position (1-based) offset of the 14-bit spare field within the
/// information block.
pub const SPARE_FIELD_T018_START: usize = 141;
pub const SPARE_FIELD_LEN_BITS: usize = 14;

/// T.018-position (1-based) offset of the rotating-field block.
pub const ROTATING_FIELD_T018_START: usize = 155;
pub const ROTATING_FIELD_KIND_LEN_BITS: usize = 4;
pub const ROTATING_FIELD_PAYLOAD_LEN_BITS: usize = 44;

/// BCH(250, 202, 6) generator polynomial. Bit 48 is the implicit leading
/// coefficient; bits 47..0 are carried here.
pub const BCH_GENERATOR_POLY: u64 = 0x1C7EB85DF3C97;
pub const BCH_CODEWORD_LEN_BITS: usize = 250;
pub const BCH_INFO_LEN_BITS: usize = INFO_LEN_BITS;
pub const BCH_PARITY_LEN_BITS: usize = PARITY_LEN_BITS;

/// Number of PRN chips spreading one data bit on one channel.
pub const CHIPS_PER_BIT: usize = 256;

/// Total transmitted bits per burst: preamble + 252-bit frame.
///
/// The per-channel chip count is fixed at exactly 38,400 (150 data bits
/// spread at 256 chips/bit), which only holds if the *total* transmitted
/// bit count is 300. With a 252-bit frame that pins the preamble at 48
/// bits, not the rounder-looking 50.
pub const PREAMBLE_LEN_BITS: usize = 48;
pub const TRANSMITTED_LEN_BITS: usize = PREAMBLE_LEN_BITS + FRAME_LEN_BITS;

/// Each channel (I, Q) carries half of the transmitted bits.
pub const BITS_PER_CHANNEL: usize = TRANSMITTED_LEN_BITS / 2;
pub const CHIPS_PER_CHANNEL: usize = BITS_PER_CHANNEL * CHIPS_PER_BIT;

/// DSSS chip rate, in chips per second.
pub const CHIP_RATE_HZ: u32 = 38_400;

/// Minimum caller-chosen oversampling factor (samples per chip).
pub const MIN_SPS: u32 = 8;

/// 23-bit PRN LFSR initial states, T.018 Table 2.2.
pub const PRN_NORMAL_I_INIT: u32 = 0x000001;
pub const PRN_SELFTEST_I_INIT: u32 = 0x52C9F0;
pub const PRN_SELFTEST_Q_INIT: u32 = 0x3CE928;

/// Number of LFSR steps separating the Normal/Q initial state from
/// Normal/I (T.018 Table 2.2 "64-chip offset" property).
pub const PRN_NORMAL_Q_OFFSET_STEPS: u32 = 64;

/// T.018 Table 2.2 reference: first 64 chips of the Normal/I sequence,
/// packed MSB-first with bit = 1 iff chip == -1.
pub const PRN_TABLE_2_2_REFERENCE: u64 = 0x8000_0108_4212_84A1;

/// Altitude field encoding range, meters.
pub const ALTITUDE_FLOOR_M: f64 = -400.0;
pub const ALTITUDE_CEILING_M: f64 = 15_952.0;
pub const ALTITUDE_STEP_M: f64 = 16.0;
pub const ALTITUDE_CODE_MAX: u16 = 1022;
pub const ALTITUDE_CODE_RESERVED: u16 = 1023;

/// Saturating limits for the G008 rotating-field elapsed-time counters.
pub const G008_ELAPSED_HOURS_MAX: u8 = 63;
pub const G008_MINUTES_SINCE_FIX_MAX: u16 = 2046;

/// TAC value substituted when `test_mode == TestMode::Test`.
pub const TEST_MODE_TAC: u16 = 9999;
