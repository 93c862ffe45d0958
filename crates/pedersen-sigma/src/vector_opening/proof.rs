//! Messages, statement and witness of the batched vector-opening protocol

use pedersen_core::{
    CommitmentKey, GroupElement, InnerProduct, PedersenError, PedersenResult, Scalar, Vector,
    VectorOpening,
};

/// Public commitments `C_1..C_m`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOpeningStatement {
    pub commitments: Vec<GroupElement>,
}

impl VectorOpeningStatement {
    pub fn new(commitments: Vec<GroupElement>) -> Self {
        Self { commitments }
    }

    /// Number of batched commitments `m`
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }

    /// `sum_i e^i * C_i` over `C_0..C_m`, with `C_0` the prover's first message
    pub fn aggregate(
        &self,
        first_message: &GroupElement,
        challenge: &Scalar,
    ) -> PedersenResult<GroupElement> {
        let powers = Vector::powers(challenge, self.len());
        let commitments: Vector<GroupElement> = std::iter::once(*first_message)
            .chain(self.commitments.iter().copied())
            .collect();
        powers.inner_product(&commitments)
    }
}

/// Openings `(x_i, r_i)` of `C_1..C_m`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOpeningWitness {
    pub openings: Vec<VectorOpening>,
}

impl VectorOpeningWitness {
    pub fn new(openings: Vec<VectorOpening>) -> Self {
        Self { openings }
    }

    /// Check there is at least one non-empty opening and all match the key's length
    pub fn validate(&self, key: &CommitmentKey) -> PedersenResult<()> {
        if self.openings.is_empty() {
            return Err(PedersenError::InvalidParameters(
                "at least one opening is required".to_string(),
            ));
        }
        if key.vector_length() == 0 {
            return Err(PedersenError::InvalidParameters(
                "vectors must be non-empty".to_string(),
            ));
        }
        for opening in &self.openings {
            if opening.len() != key.vector_length() {
                return Err(PedersenError::VectorLengthMismatch {
                    expected: key.vector_length(),
                    actual: opening.len(),
                });
            }
        }
        Ok(())
    }

    /// The public commitments this witness opens
    pub fn statement(&self, key: &CommitmentKey) -> PedersenResult<VectorOpeningStatement> {
        self.validate(key)?;
        self.openings
            .iter()
            .map(|opening| opening.commit(key))
            .collect::<PedersenResult<Vec<_>>>()
            .map(VectorOpeningStatement::new)
    }
}

/// Prover's first message `C_0 = r_0*H + <x_0, G_vec>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorOpeningCommitment {
    pub blinding_commitment: GroupElement,
}

/// Aggregate opening `(z, s)` with `z = sum_i e^i x_i` and `s = sum_i e^i r_i`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOpeningResponse {
    pub z: Vector<Scalar>,
    pub s: Scalar,
}

/// One run of the protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorOpeningTranscript {
    pub commitment: VectorOpeningCommitment,
    pub challenge: Scalar,
    pub response: VectorOpeningResponse,
}
