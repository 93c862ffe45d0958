//! Group operations and point utilities over secp256k1

use crate::{PedersenError, PedersenResult};
use k256::elliptic_curve::{
    bigint::U256,
    point::{AffineCoordinates, DecompressPoint},
    sec1::ToEncodedPoint,
    subtle::Choice,
    Curve, PrimeField,
};
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar, Secp256k1};
use rand_core::{CryptoRng, RngCore};

/// A point on secp256k1 (or the identity) with additional utility methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupElement(pub ProjectivePoint);

impl GroupElement {
    /// Identity element
    pub fn identity() -> Self {
        Self(ProjectivePoint::IDENTITY)
    }

    /// The SEC2 base point
    pub fn generator() -> Self {
        Self(ProjectivePoint::GENERATOR)
    }

    /// Order `n` of the scalar field
    pub fn order() -> U256 {
        Secp256k1::ORDER
    }

    /// Recover the point with the given big-endian x-coordinate and an even y.
    ///
    /// Fails with [`PedersenError::NotOnCurve`] when `x^3 + 7` is not a square,
    /// or when `x` is not a canonical field element.
    pub fn from_x(x: &[u8; 32]) -> PedersenResult<Self> {
        let x = FieldBytes::clone_from_slice(x);
        Option::<AffinePoint>::from(AffinePoint::decompress(&x, Choice::from(0)))
            .map(|point| Self(ProjectivePoint::from(point)))
            .ok_or(PedersenError::NotOnCurve)
    }

    /// Whether this is the group identity
    pub fn is_identity(&self) -> bool {
        self.0 == ProjectivePoint::IDENTITY
    }

    /// Big-endian affine x-coordinate
    pub fn x_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0.to_affine().x());
        out
    }

    /// Affine coordinates as 64-character lowercase hex strings, `None` for the identity
    pub fn to_hex_coordinates(&self) -> Option<(String, String)> {
        let encoded = self.0.to_affine().to_encoded_point(false);
        match (encoded.x(), encoded.y()) {
            (Some(x), Some(y)) => Some((hex::encode(x), hex::encode(y))),
            _ => None,
        }
    }
}

impl Default for GroupElement {
    fn default() -> Self {
        Self::identity()
    }
}

/// Draw a uniformly random non-zero scalar.
///
/// Samples 32 bytes and rejects encodings that are zero or not below the group order.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let mut bytes = FieldBytes::default();
        rng.fill_bytes(&mut bytes);

        let Some(scalar) = Option::<Scalar>::from(Scalar::from_repr(bytes)) else {
            continue;
        };
        if scalar != Scalar::ZERO {
            return scalar;
        }
    }
}

/// Big-endian hex encoding of a scalar
pub fn scalar_to_hex(scalar: &Scalar) -> String {
    hex::encode(scalar.to_bytes())
}

impl std::ops::Add for GroupElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for GroupElement {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for GroupElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::Mul<Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Mul<&Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Neg for GroupElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for GroupElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, point| acc + point)
    }
}

impl From<ProjectivePoint> for GroupElement {
    fn from(point: ProjectivePoint) -> Self {
        Self(point)
    }
}

impl From<GroupElement> for ProjectivePoint {
    fn from(element: GroupElement) -> Self {
        element.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::elliptic_curve::bigint::Encoding;
    use rand::rngs::OsRng;

    const GENERATOR_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const GENERATOR_Y: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_generator_coordinates() {
        let (x, y) = GroupElement::generator().to_hex_coordinates().unwrap();
        assert_eq!(x, GENERATOR_X);
        assert_eq!(y, GENERATOR_Y);
    }

    #[test]
    fn test_from_x_recovers_generator() {
        // The base point's y is even, so x-recovery lands on it exactly.
        let x = GroupElement::generator().x_bytes();
        assert_eq!(GroupElement::from_x(&x).unwrap(), GroupElement::generator());
    }

    #[test]
    fn test_from_x_rejects_non_residue() {
        // x = 5: 5^3 + 7 = 132 is a non-residue mod p
        let mut x = [0u8; 32];
        x[31] = 5;
        assert_eq!(GroupElement::from_x(&x), Err(PedersenError::NotOnCurve));
    }

    #[test]
    fn test_from_x_rejects_non_canonical() {
        assert_eq!(GroupElement::from_x(&[0xff; 32]), Err(PedersenError::NotOnCurve));
    }

    #[test]
    fn test_identity_has_no_coordinates() {
        assert!(GroupElement::identity().is_identity());
        assert!(GroupElement::identity().to_hex_coordinates().is_none());
    }

    #[test]
    fn test_group_arithmetic() {
        let g = GroupElement::generator();
        let two = Scalar::from(2u64);
        assert_eq!(g + g, g * two);
        assert_eq!(g - g, GroupElement::identity());
        assert_eq!(g + (-g), GroupElement::identity());
        assert_eq!(vec![g, g, g].into_iter().sum::<GroupElement>(), g * Scalar::from(3u64));
    }

    #[test]
    fn test_random_scalar_nonzero_and_distinct() {
        let mut rng = OsRng;
        let a = random_scalar(&mut rng);
        let b = random_scalar(&mut rng);
        assert_ne!(a, Scalar::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn test_scalar_to_hex_is_fixed_width() {
        assert_eq!(scalar_to_hex(&Scalar::from(255u64)), format!("{}ff", "0".repeat(62)));
        assert_eq!(
            scalar_to_hex(&-Scalar::ONE),
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"
        );
    }

    #[test]
    fn test_order_annihilates_generator() {
        // n - 1 is the largest valid scalar; (n - 1)G + G is the identity
        let minus_one = -Scalar::ONE;
        let g = GroupElement::generator();
        assert!((g * minus_one + g).is_identity());
        assert_eq!(
            hex::encode(GroupElement::order().to_be_bytes()),
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
        );
    }
}
