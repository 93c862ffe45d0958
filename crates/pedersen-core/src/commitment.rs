//! Pedersen commitments to scalars and scalar vectors
//!
//! ```text
//! commit(v, r)  = r*H + v*G
//! commit(x, r)  = r*H + <x, G_vec>
//! ```
//!
//! Both forms are additively homomorphic: the sum of two commitments opens to
//! the sum of the openings.

use crate::{
    random_scalar, GeneratorDeriver, GroupElement, InnerProduct, PedersenError, PedersenResult,
    Vector, BLINDING_LABEL, VALUE_LABEL,
};
use k256::Scalar;
use rand_core::{CryptoRng, RngCore};

/// Commit to a single scalar: `blinding * blinding_basis + value * value_basis`
pub fn commit(
    value: &Scalar,
    blinding: &Scalar,
    value_basis: &GroupElement,
    blinding_basis: &GroupElement,
) -> GroupElement {
    *blinding_basis * blinding + *value_basis * value
}

/// Commit to a scalar vector: `blinding * blinding_basis + <values, value_basis>`
pub fn commit_vector(
    values: &Vector<Scalar>,
    blinding: &Scalar,
    value_basis: &Vector<GroupElement>,
    blinding_basis: &GroupElement,
) -> PedersenResult<GroupElement> {
    Ok(*blinding_basis * blinding + values.inner_product(value_basis)?)
}

/// Index of the blinding base `H` within its family
pub const BLINDING_BASE_INDEX: usize = 2;

/// Bases shared by commitments and proofs over vectors of one length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentKey {
    /// Value base for single-scalar commitments
    pub g: GroupElement,
    /// Blinding base
    pub h: GroupElement,
    /// Value bases for vector commitments
    pub g_vec: Vector<GroupElement>,
}

impl CommitmentKey {
    /// Key over the default value and blinding families
    pub fn new(deriver: &GeneratorDeriver, vector_length: usize) -> PedersenResult<Self> {
        Self::with_labels(deriver, VALUE_LABEL, BLINDING_LABEL, vector_length)
    }

    /// Key over caller-chosen generator families.
    ///
    /// `g` is index 0 of the value family and `g_vec` its indices `1..=vector_length`.
    /// `h` is index [`BLINDING_BASE_INDEX`] of the blinding family, which is entry 1
    /// of its fixture table (see [`crate::table_start`]), since entry 0 is the
    /// first hashed point and index 0 the shared generator.
    pub fn with_labels(
        deriver: &GeneratorDeriver,
        value_label: &str,
        blinding_label: &str,
        vector_length: usize,
    ) -> PedersenResult<Self> {
        if value_label == blinding_label {
            return Err(PedersenError::InvalidParameters(format!(
                "value and blinding families share the label {value_label:?}"
            )));
        }
        Ok(Self {
            g: deriver.derive(value_label, 0)?,
            h: deriver.derive(blinding_label, BLINDING_BASE_INDEX)?,
            g_vec: deriver.derive_vector(value_label, vector_length)?,
        })
    }

    pub fn vector_length(&self) -> usize {
        self.g_vec.len()
    }

    pub fn commit_scalar(&self, value: &Scalar, blinding: &Scalar) -> GroupElement {
        commit(value, blinding, &self.g, &self.h)
    }

    pub fn commit_vector(
        &self,
        values: &Vector<Scalar>,
        blinding: &Scalar,
    ) -> PedersenResult<GroupElement> {
        commit_vector(values, blinding, &self.g_vec, &self.h)
    }
}

/// Opening `(value, blinding)` of a scalar commitment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarOpening {
    pub value: Scalar,
    pub blinding: Scalar,
}

impl ScalarOpening {
    pub fn new(value: Scalar, blinding: Scalar) -> Self {
        Self { value, blinding }
    }

    /// Opening of `value` under a fresh random blinding
    pub fn random_blinding<R: RngCore + CryptoRng>(rng: &mut R, value: Scalar) -> Self {
        Self::new(value, random_scalar(rng))
    }

    pub fn commit(&self, key: &CommitmentKey) -> GroupElement {
        key.commit_scalar(&self.value, &self.blinding)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.value + other.value, self.blinding + other.blinding)
    }
}

/// Opening `(values, blinding)` of a vector commitment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOpening {
    pub values: Vector<Scalar>,
    pub blinding: Scalar,
}

impl VectorOpening {
    pub fn new(values: Vector<Scalar>, blinding: Scalar) -> Self {
        Self { values, blinding }
    }

    /// Random length-`n` vector under a random blinding
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Self {
        let values = Vector::random(rng, n);
        Self::new(values, random_scalar(rng))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn commit(&self, key: &CommitmentKey) -> PedersenResult<GroupElement> {
        key.commit_vector(&self.values, &self.blinding)
    }

    pub fn add(&self, other: &Self) -> PedersenResult<Self> {
        Ok(Self::new(
            self.values.checked_add(&other.values)?,
            self.blinding + other.blinding,
        ))
    }

    /// Both components multiplied by `k`
    pub fn scale(&self, k: &Scalar) -> Self {
        Self::new(self.values.scalar_multiply(k), self.blinding * k)
    }
}
