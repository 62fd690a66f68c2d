//! Field arithmetic modulo p = 2^255 - 19 using 64-bit limbs.

use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// Mask selecting the low 51 bits of a limb.
const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// 16 * p, limb by limb. Added before subtracting so that no limb underflows.
const SIXTEEN_P: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

/// Element of GF(2^255 - 19).
///
/// Uses 5 64-bit limbs (little-endian) of nominally 51 bits each. Every
/// operation leaves each limb below 2^52, which is the headroom the
/// multiplication relies on. The representation is not canonical; use
/// [`FieldElement::to_bytes`] to obtain the unique encoding.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0, 0]);

    /// (A + 2) / 4 for the Curve25519 coefficient A = 486662.
    pub const A_PLUS_TWO_OVER_FOUR: Self = Self([121666, 0, 0, 0, 0]);

    /// Decode 32 little-endian bytes.
    ///
    /// Bit 255 is ignored, as RFC 7748 requires for u-coordinates. Values in
    /// `[p, 2^255)` are accepted and behave as their reduction mod p.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        #[inline(always)]
        fn load8(input: &[u8]) -> u64 {
            (input[0] as u64)
                | ((input[1] as u64) << 8)
                | ((input[2] as u64) << 16)
                | ((input[3] as u64) << 24)
                | ((input[4] as u64) << 32)
                | ((input[5] as u64) << 40)
                | ((input[6] as u64) << 48)
                | ((input[7] as u64) << 56)
        }

        Self([
            load8(&bytes[0..]) & LOW_51_BIT_MASK,
            (load8(&bytes[6..]) >> 3) & LOW_51_BIT_MASK,
            (load8(&bytes[12..]) >> 6) & LOW_51_BIT_MASK,
            (load8(&bytes[19..]) >> 1) & LOW_51_BIT_MASK,
            (load8(&bytes[24..]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Returns the canonical little-endian encoding, fully reduced into `[0, p)`.
    pub fn to_bytes(self) -> [u8; 32] {
        let mut limbs = Self::weak_reduce(self.0).0;

        // The value is now below 2p, so q = floor((value + 19) / 2^255) is 1
        // exactly when value >= p.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // value - q * p = value + 19 q - q 2^255; the 2^255 term is dropped
        // by masking the top limb after the carry chain.
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut out = [0u8; 32];
        let mut acc: u128 = 0;
        let mut acc_bits = 0;
        let mut pos = 0;
        for limb in limbs {
            acc |= (limb as u128) << acc_bits;
            acc_bits += 51;
            while acc_bits >= 8 {
                out[pos] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                pos += 1;
            }
        }
        // 255 = 31 * 8 + 7
        out[31] = acc as u8;
        out
    }

    /// Propagates carries so that every limb is below 2^52 again.
    #[inline(always)]
    const fn weak_reduce(mut limbs: [u64; 5]) -> Self {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        // 2^255 = 19 (mod p)
        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        Self(limbs)
    }

    /// Reduces the five 128-bit column sums of a product back to 51-bit limbs.
    #[inline(always)]
    fn carry_wide(mut c: [u128; 5]) -> Self {
        let mut out = [0u64; 5];

        c[1] += (c[0] >> 51) as u64 as u128;
        out[0] = (c[0] as u64) & LOW_51_BIT_MASK;

        c[2] += (c[1] >> 51) as u64 as u128;
        out[1] = (c[1] as u64) & LOW_51_BIT_MASK;

        c[3] += (c[2] >> 51) as u64 as u128;
        out[2] = (c[2] as u64) & LOW_51_BIT_MASK;

        c[4] += (c[3] >> 51) as u64 as u128;
        out[3] = (c[3] as u64) & LOW_51_BIT_MASK;

        let carry = (c[4] >> 51) as u64;
        out[4] = (c[4] as u64) & LOW_51_BIT_MASK;

        // With limbs below 2^52 the columns stay below 2^111, so `carry * 19`
        // fits in 64 bits.
        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        Self(out)
    }

    /// Returns self * self.
    pub fn square(&self) -> Self {
        let a = &self.0;

        let a3_19 = 19 * a[3];
        let a4_19 = 19 * a[4];

        let d0 = 2 * a[0];
        let d1 = 2 * a[1];
        let d2 = 2 * a[2];
        let d3 = 2 * a[3];

        let c0 = m(a[0], a[0]) + m(d1, a4_19) + m(d2, a3_19);
        let c1 = m(d0, a[1]) + m(d2, a4_19) + m(a[3], a3_19);
        let c2 = m(d0, a[2]) + m(a[1], a[1]) + m(d3, a4_19);
        let c3 = m(d0, a[3]) + m(d1, a[2]) + m(a[4], a4_19);
        let c4 = m(d0, a[4]) + m(d1, a[3]) + m(a[2], a[2]);

        Self::carry_wide([c0, c1, c2, c3, c4])
    }

    /// Returns self^(2^k) for k >= 1.
    pub fn pow2k(&self, k: u32) -> Self {
        debug_assert!(k > 0);
        let mut x = self.square();
        for _ in 1..k {
            x = x.square();
        }
        x
    }

    /// Returns the multiplicative inverse of self, or zero when self is zero.
    ///
    /// Computes self^(p - 2) with a fixed addition chain, so the running time
    /// does not depend on the value.
    pub fn invert(&self) -> Self {
        let z2 = self.square(); // 2
        let z9 = z2.pow2k(2) * self; // 9
        let z11 = z9 * z2; // 11
        let z_5_0 = z11.square() * z9; // 2^5 - 1
        let z_10_0 = z_5_0.pow2k(5) * z_5_0; // 2^10 - 1
        let z_20_0 = z_10_0.pow2k(10) * z_10_0; // 2^20 - 1
        let z_40_0 = z_20_0.pow2k(20) * z_20_0; // 2^40 - 1
        let z_50_0 = z_40_0.pow2k(10) * z_10_0; // 2^50 - 1
        let z_100_0 = z_50_0.pow2k(50) * z_50_0; // 2^100 - 1
        let z_200_0 = z_100_0.pow2k(100) * z_100_0; // 2^200 - 1
        let z_250_0 = z_200_0.pow2k(50) * z_50_0; // 2^250 - 1

        z_250_0.pow2k(5) * z11 // 2^255 - 21 = p - 2
    }
}

#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl DefaultIsZeroes for FieldElement {}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &rhs.0);
        FieldElement::weak_reduce([
            a[0] + b[0],
            a[1] + b[1],
            a[2] + b[2],
            a[3] + b[3],
            a[4] + b[4],
        ])
    }
}

impl_binop_variants!(FieldElement, Add, add, AddAssign, add_assign);

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &rhs.0);
        FieldElement::weak_reduce([
            (a[0] + SIXTEEN_P[0]) - b[0],
            (a[1] + SIXTEEN_P[1]) - b[1],
            (a[2] + SIXTEEN_P[2]) - b[2],
            (a[3] + SIXTEEN_P[3]) - b[3],
            (a[4] + SIXTEEN_P[4]) - b[4],
        ])
    }
}

impl_binop_variants!(FieldElement, Sub, sub, SubAssign, sub_assign);

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &rhs.0);

        // Columns that wrap past 2^255 pick up a factor of 19.
        let b1_19 = 19 * b[1];
        let b2_19 = 19 * b[2];
        let b3_19 = 19 * b[3];
        let b4_19 = 19 * b[4];

        let c0 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        FieldElement::carry_wide([c0, c1, c2, c3, c4])
    }
}

impl_binop_variants!(FieldElement, Mul, mul, MulAssign, mul_assign);
