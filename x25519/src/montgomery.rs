//! Curve25519 in Montgomery form, `v^2 = u^3 + 486662 u^2 + u`, using
//! u-coordinates only.

use crate::field::FieldElement;
use crate::scalar::{bit, clamp_integer};
use core::fmt::{self, Debug};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::{DefaultIsZeroes, Zeroize, Zeroizing};

/// Encodings of the points of order 2, 4 and 8 on Curve25519 and its
/// twist, plus the non-canonical encodings (p - 1, p, p + 1) that reduce to
/// the same u-coordinates. Multiplying any of them by a clamped scalar yields
/// the all-zero u-coordinate.
const LOW_ORDER_POINTS: [MontgomeryPoint; 7] = [
    // 0 (order 2)
    MontgomeryPoint([
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
    ]),
    // 1 (order 4)
    MontgomeryPoint([
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
    ]),
    // order 8
    MontgomeryPoint([
        0xe0, 0xeb, 0x7a, 0x7c, 0x3b, 0x41, 0xb8, 0xae, 0x16, 0x56, 0xe3, 0xfa, 0xf1, 0x9f, 0xc4,
        0x6a, 0xda, 0x09, 0x8d, 0xeb, 0x9c, 0x32, 0xb1, 0xfd, 0x86, 0x62, 0x05, 0x16, 0x5f, 0x49,
        0xb8, 0x00,
    ]),
    // order 8
    MontgomeryPoint([
        0x5f, 0x9c, 0x95, 0xbc, 0xa3, 0x50, 0x8c, 0x24, 0xb1, 0xd0, 0xb1, 0x55, 0x9c, 0x83, 0xef,
        0x5b, 0x04, 0x44, 0x5c, 0xc4, 0x58, 0x1c, 0x8e, 0x86, 0xd8, 0x22, 0x4e, 0xdd, 0xd0, 0x9f,
        0x11, 0x57,
    ]),
    // p - 1 (order 4)
    MontgomeryPoint([
        0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ]),
    // p, non-canonical 0
    MontgomeryPoint([
        0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ]),
    // p + 1, non-canonical 1
    MontgomeryPoint([
        0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x7f,
    ]),
];

/// A point on Curve25519 or its twist, given by the 32-byte little-endian
/// encoding of its u-coordinate.
///
/// Every 32-byte string is a valid encoding: bit 255 is ignored and values
/// at or above p are reduced.
#[derive(Copy, Clone, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl DefaultIsZeroes for MontgomeryPoint {}

impl Debug for MontgomeryPoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0[..], formatter)
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

impl MontgomeryPoint {
    /// Returns the generator specified in RFC7748, u = 9.
    pub const GENERATOR: Self = Self([
        0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00,
    ]);

    /// Returns true if the point is one of the known low order points.
    ///
    /// Bit 255 is ignored, matching how the point is decoded. The comparison
    /// against each table entry is constant-time.
    pub fn is_low_order(&self) -> bool {
        let mut masked = *self;
        masked.0[31] &= 0x7f;

        let mut found = Choice::from(0);
        for point in &LOW_ORDER_POINTS {
            found |= masked.ct_eq(point);
        }
        found.into()
    }

    /// View the point as a byte slice
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert the point to projective (U:W) form with W = 1.
    pub(crate) fn to_projective(self) -> ProjectiveMontgomeryXpoint {
        ProjectiveMontgomeryXpoint {
            U: FieldElement::from_bytes(&self.0),
            W: FieldElement::ONE,
        }
    }

    /// Multiplies this point by `scalar` after clamping it.
    ///
    /// This is the X25519 function of RFC 7748. Low order inputs produce the
    /// all-zero output rather than an error.
    pub fn mul_clamped(&self, scalar: &[u8; 32]) -> MontgomeryPoint {
        let scalar = Zeroizing::new(clamp_integer(*scalar));
        let mut x0 = self.to_projective().ladder(&scalar);
        let point = x0.to_affine();
        x0.zeroize();
        point
    }

    /// Multiplies the generator by `scalar` after clamping it.
    pub fn mul_base_clamped(scalar: &[u8; 32]) -> MontgomeryPoint {
        Self::GENERATOR.mul_clamped(scalar)
    }
}

/// A Projective point in Montgomery form
#[derive(Copy, Clone, Debug)]
pub(crate) struct ProjectiveMontgomeryXpoint {
    U: FieldElement,
    W: FieldElement,
}

impl ConditionallySelectable for ProjectiveMontgomeryXpoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }
}

impl Zeroize for ProjectiveMontgomeryXpoint {
    fn zeroize(&mut self) {
        self.U.zeroize();
        self.W.zeroize();
    }
}

/// One ladder step: `P <- 2P` and `Q <- P + Q`, given the affine u-coordinate
/// of `P - Q`.
fn differential_add_and_double(
    P: &mut ProjectiveMontgomeryXpoint,
    Q: &mut ProjectiveMontgomeryXpoint,
    affine_PmQ: &FieldElement,
) {
    let t0 = P.U + P.W;
    let t1 = P.U - P.W;
    let t2 = Q.U + Q.W;
    let t3 = Q.U - Q.W;

    let t4 = t0.square(); // (U_P + W_P)^2 = U_P^2 + 2 U_P W_P + W_P^2
    let t5 = t1.square(); // (U_P - W_P)^2 = U_P^2 - 2 U_P W_P + W_P^2

    let t6 = t4 - t5; // 4 U_P W_P

    let t7 = t0 * t3; // (U_P + W_P) (U_Q - W_Q) = U_P U_Q + W_P U_Q - U_P W_Q - W_P W_Q
    let t8 = t1 * t2; // (U_P - W_P) (U_Q + W_Q) = U_P U_Q - W_P U_Q + U_P W_Q - W_P W_Q

    let t9 = t7 + t8; // 2 (U_P U_Q - W_P W_Q)
    let t10 = t7 - t8; // 2 (W_P U_Q - U_P W_Q)

    let t11 = t9.square(); // 4 (U_P U_Q - W_P W_Q)^2
    let t12 = t10.square(); // 4 (W_P U_Q - U_P W_Q)^2
    let t13 = FieldElement::A_PLUS_TWO_OVER_FOUR * t6; // (A + 2) U_P W_P

    let t14 = t4 * t5; // (U_P^2 - W_P^2)^2
    let t15 = t13 + t5; // (U_P - W_P)^2 + (A + 2) U_P W_P

    let t16 = t6 * t15; // 4 U_P W_P ((U_P - W_P)^2 + (A + 2) U_P W_P)
    let t17 = *affine_PmQ * t12; // U_D * 4 (W_P U_Q - U_P W_Q)^2

    P.U = t14;
    P.W = t16;
    Q.U = t11; // W_D = 1
    Q.W = t17;
}

impl ProjectiveMontgomeryXpoint {
    /// The identity element of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        U: FieldElement::ONE,
        W: FieldElement::ZERO,
    };

    /// Montgomery ladder over bits 254..=0 of an already clamped scalar.
    ///
    /// `self` must have W = 1 since its U is used as the fixed difference
    /// between the two running points. Every iteration performs the same
    /// field operations, and the swaps are driven by `Choice`, so neither
    /// timing nor memory access depends on the scalar.
    fn ladder(&self, scalar: &[u8; 32]) -> Self {
        // Algorithm 8 of Costello-Smith 2017
        let mut x0 = Self::IDENTITY;
        let mut x1 = *self;

        let mut swap = Choice::from(0);
        for i in (0..255).rev() {
            let b = bit(scalar, i);
            Self::conditional_swap(&mut x0, &mut x1, swap ^ b);
            differential_add_and_double(&mut x0, &mut x1, &self.U);
            swap = b;
        }
        Self::conditional_swap(&mut x0, &mut x1, swap);

        x1.zeroize();
        x0
    }

    /// Convert the point to affine form. The identity maps to u = 0.
    fn to_affine(self) -> MontgomeryPoint {
        let x = self.U * self.W.invert();
        MontgomeryPoint(x.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// Reference multiplication by a small unclamped scalar, taking the
    /// ladder branches directly on the bits of `n`.
    fn naive_mul(point: MontgomeryPoint, n: u32) -> MontgomeryPoint {
        let base = point.to_projective();
        let mut x0 = ProjectiveMontgomeryXpoint::IDENTITY;
        let mut x1 = base;
        for i in (0..32).rev() {
            if (n >> i) & 1 == 1 {
                differential_add_and_double(&mut x1, &mut x0, &base.U);
            } else {
                differential_add_and_double(&mut x0, &mut x1, &base.U);
            }
        }
        x0.to_affine()
    }

    #[test]
    fn generator_encoding() {
        assert_eq!(
            MontgomeryPoint::GENERATOR.to_projective().to_affine(),
            MontgomeryPoint::GENERATOR
        );
    }

    #[test]
    fn identity_is_zero() {
        assert_eq!(
            ProjectiveMontgomeryXpoint::IDENTITY.to_affine(),
            MontgomeryPoint([0u8; 32])
        );
    }

    #[test]
    fn small_multiples() {
        // The order-8 points vanish under [8] but not under [2].
        for point in &LOW_ORDER_POINTS[2..4] {
            assert_eq!(naive_mul(*point, 8), MontgomeryPoint([0u8; 32]));
            assert_ne!(naive_mul(*point, 2), MontgomeryPoint([0u8; 32]));
        }

        let g = MontgomeryPoint::GENERATOR;
        assert_eq!(naive_mul(naive_mul(g, 2), 2), naive_mul(g, 4));
        assert_eq!(naive_mul(naive_mul(g, 3), 5), naive_mul(g, 15));
    }

    #[test]
    fn mul_clamped_rfc7748_vector() {
        let scalar = hex!("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
        let point = MontgomeryPoint(hex!(
            "e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c"
        ));
        let expected = hex!("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552");
        assert_eq!(point.mul_clamped(&scalar).0, expected);
    }

    #[test]
    fn mul_clamped_is_compatible_with_scalar_products() {
        // k1 * (k2 * G) == k2 * (k1 * G) for clamped k1, k2
        let k1 = [0x11; 32];
        let k2 = [0x77; 32];
        let a = MontgomeryPoint::mul_base_clamped(&k1).mul_clamped(&k2);
        let b = MontgomeryPoint::mul_base_clamped(&k2).mul_clamped(&k1);
        assert_eq!(a, b);
    }

    #[test]
    fn low_order_points() {
        for point in &LOW_ORDER_POINTS {
            assert!(point.is_low_order());
            assert_eq!(point.mul_clamped(&[0x42; 32]), MontgomeryPoint([0u8; 32]));

            let mut high_bit = *point;
            high_bit.0[31] |= 0x80;
            assert!(high_bit.is_low_order());
        }
        assert!(!MontgomeryPoint::GENERATOR.is_low_order());
    }
}
