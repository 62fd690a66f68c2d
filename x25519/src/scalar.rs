//! Scalar clamping as specified by RFC 7748.

use subtle::Choice;

/// Clamps 32 little-endian bytes into an X25519 scalar.
///
/// Clears the three low bits (so the scalar is a multiple of the cofactor 8),
/// clears bit 255 and sets bit 254. Clamping is idempotent.
pub const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Returns bit `i` of a little-endian scalar.
///
/// `i` is a loop counter, never secret; only the returned bit is.
#[inline(always)]
pub(crate) fn bit(scalar: &[u8; 32], i: usize) -> Choice {
    Choice::from((scalar[i >> 3] >> (i & 7)) & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_all_ones() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0], 0xf8);
        assert_eq!(clamped[1..31], [0xff; 30]);
        assert_eq!(clamped[31], 0x7f);
    }

    #[test]
    fn clamp_all_zeros() {
        let clamped = clamp_integer([0; 32]);
        assert_eq!(clamped[0], 0);
        assert_eq!(clamped[31], 0x40);
    }

    #[test]
    fn clamp_is_idempotent() {
        let once = clamp_integer([0xa5; 32]);
        assert_eq!(clamp_integer(once), once);
    }

    #[test]
    fn bits_are_little_endian() {
        let mut scalar = [0u8; 32];
        scalar[0] = 0b0000_0010;
        scalar[31] = 0b0100_0000;

        assert!(bool::from(bit(&scalar, 1)));
        assert!(bool::from(bit(&scalar, 254)));
        assert!(!bool::from(bit(&scalar, 0)));
        assert!(!bool::from(bit(&scalar, 255)));
    }
}
