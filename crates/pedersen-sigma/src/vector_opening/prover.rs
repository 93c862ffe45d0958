//! Batched vector-opening prover

use crate::vector_opening::{
    VectorOpeningCommitment, VectorOpeningResponse, VectorOpeningStatement, VectorOpeningWitness,
};
use pedersen_core::{CommitmentKey, PedersenResult, Scalar, Vector, VectorOpening};
use rand_core::{CryptoRng, RngCore};

/// Secret state held between the first message and the response.
///
/// Answering two different challenges from the same state reveals the witness
/// (see [`crate::vector_opening::extract`]); a state must serve a single challenge.
#[derive(Debug, Clone)]
pub struct VectorOpeningProverState {
    blind: VectorOpening,
}

/// Prover knowing openings of every batched commitment
#[derive(Debug)]
pub struct VectorOpeningProver<'a> {
    key: &'a CommitmentKey,
    witness: VectorOpeningWitness,
}

impl<'a> VectorOpeningProver<'a> {
    /// Create a prover for `witness`, whose openings must all have the key's length
    pub fn new(key: &'a CommitmentKey, witness: VectorOpeningWitness) -> PedersenResult<Self> {
        witness.validate(key)?;
        Ok(Self { key, witness })
    }

    pub fn statement(&self) -> PedersenResult<VectorOpeningStatement> {
        self.witness.statement(self.key)
    }

    /// First move: sample `(x_0, r_0)` and send `C_0 = r_0*H + <x_0, G_vec>`
    #[tracing::instrument(
        skip_all,
        fields(m = self.witness.openings.len(), n = self.key.vector_length())
    )]
    pub fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> PedersenResult<(VectorOpeningProverState, VectorOpeningCommitment)> {
        let blind = VectorOpening::random(rng, self.key.vector_length());
        let blinding_commitment = blind.commit(self.key)?;
        Ok((
            VectorOpeningProverState { blind },
            VectorOpeningCommitment { blinding_commitment },
        ))
    }

    /// Third move: `z = sum_i e^i x_i`, `s = sum_i e^i r_i` over `i = 0..m`
    #[tracing::instrument(skip_all)]
    pub fn respond(
        &self,
        state: VectorOpeningProverState,
        challenge: &Scalar,
    ) -> PedersenResult<VectorOpeningResponse> {
        let powers = Vector::powers(challenge, self.witness.openings.len());
        let mut aggregate =
            VectorOpening::new(Vector::zeros(self.key.vector_length()), Scalar::ZERO);
        for (power, opening) in powers
            .iter()
            .zip(std::iter::once(&state.blind).chain(self.witness.openings.iter()))
        {
            aggregate = aggregate.add(&opening.scale(power))?;
        }

        Ok(VectorOpeningResponse {
            z: aggregate.values,
            s: aggregate.blinding,
        })
    }
}
