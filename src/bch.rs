//! Systematic binary BCH(250, 202, 6) parity.

use crate::bits::Bit;
use crate::constants::{BCH_GENERATOR_POLY, BCH_INFO_LEN_BITS, BCH_PARITY_LEN_BITS};

const REMAINDER_MASK: u64 = (1u64 << (BCH_PARITY_LEN_BITS + 1)) - 1; // 49 ones
const REMAINDER_TOP_BIT: u64 = 1u64 << BCH_PARITY_LEN_BITS; // bit 48

/// Computes and verifies BCH(250, 202, 6) parity over 202 information
/// bits, using the fixed generator polynomial `0x1C7EB85DF3C97`.
pub struct BchCodec;

impl BchCodec {
    /// `P(x) = (M(x) * x^48) mod G(x)`, returned as 48 bits MSB-first
    /// (highest remainder degree first). `info` must hold exactly
    /// [`BCH_INFO_LEN_BITS`] bits MSB-first (degree 201 down to degree
    /// 0).
    pub fn compute(info: &[Bit; BCH_INFO_LEN_BITS]) -> [Bit; BCH_PARITY_LEN_BITS] {
        let mut remainder: u64 = 0;
        for &bit in info.iter() {
            remainder = ((remainder << 1) | bit as u64) & REMAINDER_MASK;
            if remainder & REMAINDER_TOP_BIT != 0 {
                remainder ^= BCH_GENERATOR_POLY;
            }
        }
        // Flush the 48 zero coefficients of M(x) * x^48.
        for _ in 0..BCH_PARITY_LEN_BITS {
            remainder = (remainder << 1) & REMAINDER_MASK;
            if remainder & REMAINDER_TOP_BIT != 0 {
                remainder ^= BCH_GENERATOR_POLY;
            }
        }

        let mut parity = [0u8; BCH_PARITY_LEN_BITS];
        for (i, slot) in parity.iter_mut().enumerate() {
            let shift = BCH_PARITY_LEN_BITS - 1 - i;
            *slot = ((remainder >> shift) & 1) as Bit;
        }
        parity
    }

    /// Recomputes parity over `info` and compares against `parity`.
    /// Total: every input is valid, there is no failure mode beyond a
    /// boolean mismatch.
    pub fn verify(info: &[Bit; BCH_INFO_LEN_BITS], parity: &[Bit; BCH_PARITY_LEN_BITS]) -> bool {
        Self::compute(info) == *parity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from_hex(hex: &str, total_bits: usize) -> Vec<Bit> {
        let value = u128::from_str_radix(hex, 16).unwrap();
        let hex_bits = hex.len() * 4;
        let mut bits = Vec::with_capacity(hex_bits);
        for i in (0..hex_bits).rev() {
            bits.push(((value >> i) & 1) as Bit);
        }
        bits.truncate(total_bits);
        bits
    }

    /// T.018 Appendix B.1 test vector.
    #[test]
    fn appendix_b1_test_vector() {
        let info_bits = bits_from_hex(
            "00E608F4C986196188A047C000000000000FFFC0100C1A00960",
            BCH_INFO_LEN_BITS,
        );
        let info: [Bit; BCH_INFO_LEN_BITS] = info_bits.try_into().unwrap();

        let parity = BchCodec::compute(&info);
        let expect = bits_from_hex("492A4FC57A49", BCH_PARITY_LEN_BITS);
        assert_eq!(parity.as_slice(), expect.as_slice());
        assert!(BchCodec::verify(&info, &parity));
    }

    #[test]
    fn verify_rejects_flipped_parity_bit() {
        let info = [0u8; BCH_INFO_LEN_BITS];
        let mut parity = BchCodec::compute(&info);
        assert!(BchCodec::verify(&info, &parity));
        parity[0] ^= 1;
        assert!(!BchCodec::verify(&info, &parity));
    }

    #[test]
    fn verify_rejects_flipped_info_bit() {
        let mut info = [0u8; BCH_INFO_LEN_BITS];
        let parity = BchCodec::compute(&info);
        info[100] ^= 1;
        assert!(!BchCodec::verify(&info, &parity));
    }

    #[test]
    fn all_zero_info_has_all_zero_parity() {
        let info = [0u8; BCH_INFO_LEN_BITS];
        assert_eq!(BchCodec::compute(&info), [0u8; BCH_PARITY_LEN_BITS]);
    }
}
