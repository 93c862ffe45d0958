//! Fixed-length homomorphic vectors over scalars or group elements
//!
//! A [`Vector`] holds exactly one element type for its whole length. The inner
//! product is only defined for the pairings implemented by [`InnerProduct`]:
//!
//! ```text
//! <Scalar, Scalar>       -> Scalar         (sum of x_i * y_i)
//! <Scalar, GroupElement> -> GroupElement   (sum of x_i * B_i)
//! <GroupElement, Scalar> -> GroupElement
//! ```
//!
//! Every operation returns a new vector; the receiver is never mutated, so a
//! generator vector can be shared across proof sessions.

use crate::{random_scalar, GroupElement, PedersenError, PedersenResult};
use k256::Scalar;
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An ordered, fixed-length, immutable sequence of scalars or group elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector<T> {
    values: Vec<T>,
}

impl<T> Vector<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.values
    }

    /// Fail with a length mismatch unless `other` has the same length
    pub fn check_length<U>(&self, other: &Vector<U>) -> PedersenResult<()> {
        if self.len() != other.len() {
            return Err(PedersenError::VectorLengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }

    /// Elementwise binary operation
    pub fn combine<U, V, F>(&self, other: &Vector<U>, op: F) -> PedersenResult<Vector<V>>
    where
        F: Fn(&T, &U) -> V,
    {
        self.check_length(other)?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| op(a, b))
            .collect())
    }

    /// Elementwise unary operation
    pub fn transform<U, F>(&self, op: F) -> Vector<U>
    where
        F: Fn(&T) -> U,
    {
        self.values.iter().map(op).collect()
    }
}

impl Vector<Scalar> {
    /// Vector of `n` independent random non-zero scalars
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Self {
        (0..n).map(|_| random_scalar(rng)).collect()
    }

    /// Zero vector of length `n`
    pub fn zeros(n: usize) -> Self {
        Self::new(vec![Scalar::ZERO; n])
    }

    /// Exponent vector `(1, e, e^2, ..., e^m)` of length `m + 1`
    pub fn powers(e: &Scalar, m: usize) -> Self {
        let mut powers = Vec::with_capacity(m + 1);
        let mut current = Scalar::ONE;
        for _ in 0..=m {
            powers.push(current);
            current *= e;
        }
        Self::new(powers)
    }

    pub fn scalar_multiply(&self, k: &Scalar) -> Self {
        self.transform(|v| v * k)
    }

    /// Elementwise sum
    pub fn checked_add(&self, other: &Self) -> PedersenResult<Self> {
        self.combine(other, |a, b| a + b)
    }

    /// Elementwise difference
    pub fn checked_sub(&self, other: &Self) -> PedersenResult<Self> {
        self.combine(other, |a, b| a - b)
    }
}

impl Vector<GroupElement> {
    pub fn scalar_multiply(&self, k: &Scalar) -> Self {
        self.transform(|p| *p * k)
    }
}

/// Type-dispatched inner product
pub trait InnerProduct<Rhs = Self> {
    type Output;

    /// Sum of pairwise products; fails on a length mismatch
    fn inner_product(&self, rhs: &Rhs) -> PedersenResult<Self::Output>;
}

impl InnerProduct for Vector<Scalar> {
    type Output = Scalar;

    fn inner_product(&self, rhs: &Self) -> PedersenResult<Scalar> {
        self.check_length(rhs)?;
        Ok(self
            .values
            .iter()
            .zip(rhs.values.iter())
            .fold(Scalar::ZERO, |acc, (a, b)| acc + a * b))
    }
}

impl InnerProduct<Vector<GroupElement>> for Vector<Scalar> {
    type Output = GroupElement;

    fn inner_product(&self, rhs: &Vector<GroupElement>) -> PedersenResult<GroupElement> {
        self.check_length(rhs)?;
        Ok(multiscalar_mul(&self.values, &rhs.values))
    }
}

impl InnerProduct<Vector<Scalar>> for Vector<GroupElement> {
    type Output = GroupElement;

    fn inner_product(&self, rhs: &Vector<Scalar>) -> PedersenResult<GroupElement> {
        rhs.inner_product(self)
    }
}

#[cfg(not(feature = "parallel"))]
fn multiscalar_mul(scalars: &[Scalar], points: &[GroupElement]) -> GroupElement {
    scalars
        .iter()
        .zip(points.iter())
        .map(|(s, p)| *p * s)
        .sum()
}

#[cfg(feature = "parallel")]
fn multiscalar_mul(scalars: &[Scalar], points: &[GroupElement]) -> GroupElement {
    scalars
        .par_iter()
        .zip(points.par_iter())
        .map(|(s, p)| *p * s)
        .reduce(GroupElement::identity, |a, b| a + b)
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> std::ops::Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn scalars(values: &[u64]) -> Vector<Scalar> {
        values.iter().map(|v| Scalar::from(*v)).collect()
    }

    #[test]
    fn test_scalar_inner_product() {
        let a = scalars(&[1, 2, 3]);
        let b = scalars(&[1, 2, 3]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.inner_product(&b).unwrap(), Scalar::from(14u64));
    }

    #[test]
    fn test_inner_product_reduces_mod_order() {
        // (n - 1) * (n - 1) = 1 mod n
        let a = Vector::new(vec![-Scalar::ONE]);
        assert_eq!(a.inner_product(&a).unwrap(), Scalar::ONE);
    }

    #[test]
    fn test_point_inner_product_both_orders() {
        let g = GroupElement::generator();
        let points = Vector::new(vec![g, g * Scalar::from(2u64)]);
        let x = scalars(&[3, 4]);

        // 3G + 4(2G) = 11G
        let expected = g * Scalar::from(11u64);
        assert_eq!(x.inner_product(&points).unwrap(), expected);
        assert_eq!(points.inner_product(&x).unwrap(), expected);
    }

    #[test]
    fn test_length_mismatch() {
        let a = scalars(&[1, 2, 3]);
        let b = scalars(&[1, 2]);
        let expected = PedersenError::VectorLengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(a.inner_product(&b), Err(expected.clone()));
        assert_eq!(a.checked_add(&b), Err(expected));
        assert!(a.combine(&b, |x, y| x * y).is_err());

        let points = Vector::new(vec![GroupElement::generator(); 2]);
        assert!(a.inner_product(&points).is_err());
    }

    #[test]
    fn test_combine_and_transform() {
        let a = scalars(&[2, 3]);
        let b = scalars(&[4, 5]);
        assert_eq!(a.combine(&b, |x, y| x * y).unwrap(), scalars(&[8, 15]));
        assert_eq!(a.transform(|x| *x + Scalar::ONE), scalars(&[3, 4]));
        assert_eq!(b.checked_sub(&a).unwrap(), scalars(&[2, 2]));
    }

    #[test]
    fn test_scalar_multiply_leaves_receiver_intact() {
        let g = GroupElement::generator();
        let basis = Vector::new(vec![g, g + g]);
        let scaled = basis.scalar_multiply(&Scalar::from(3u64));

        assert_eq!(basis[0], g);
        assert_eq!(scaled[0], g * Scalar::from(3u64));
        assert_eq!(scalars(&[1, 2]).scalar_multiply(&Scalar::from(5u64)), scalars(&[5, 10]));
    }

    #[test]
    fn test_powers() {
        let powers = Vector::powers(&Scalar::from(3u64), 3);
        assert_eq!(powers, scalars(&[1, 3, 9, 27]));
        assert_eq!(Vector::powers(&Scalar::from(7u64), 0), scalars(&[1]));
    }

    #[test]
    fn test_random_vector() {
        let v = Vector::random(&mut OsRng, 4);
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|x| *x != Scalar::ZERO));
    }

    #[test]
    fn test_empty_inner_products() {
        let empty: Vector<Scalar> = Vector::new(vec![]);
        let no_points: Vector<GroupElement> = Vector::new(vec![]);
        assert_eq!(empty.inner_product(&empty).unwrap(), Scalar::ZERO);
        assert!(empty.inner_product(&no_points).unwrap().is_identity());
    }
}
