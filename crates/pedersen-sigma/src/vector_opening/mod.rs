//! # Batched Vector-Opening Proof
//!
//! Proves knowledge of openings `(x_i, r_i)` of `m` vector commitments
//! `C_i = r_i*H + <x_i, G_vec>` in one three-move run:
//!
//! 1. Prover samples `(x_0, r_0)` and sends `C_0 = r_0*H + <x_0, G_vec>`.
//! 2. Verifier sends a random challenge `e`.
//! 3. Prover sends `z = sum_i e^i x_i` and `s = sum_i e^i r_i` over `i = 0..m`.
//!
//! The verifier accepts iff
//!
//! ```text
//! sum_i e^i * C_i == s*H + <z, G_vec>
//! ```
//!
//! One accepting run only shows that the challenge-weighted combination opens.
//! Per-commitment knowledge follows from `m + 1` runs on the same `C_0`, see
//! [`extract`]. Fresh `(x_0, r_0)` make a run simulatable without the witness,
//! see [`simulate`].

pub mod extractor;
pub mod proof;
pub mod prover;
pub mod verifier;

pub use extractor::*;
pub use proof::*;
pub use prover::*;
pub use verifier::*;

use pedersen_core::{random_scalar, CommitmentKey, GroupElement, PedersenResult, Vector};
use rand_core::{CryptoRng, RngCore};

/// Run all three moves in-process with a random challenge and verify the result
#[tracing::instrument(skip_all, fields(m = witness.openings.len(), n = key.vector_length()))]
pub fn run<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &CommitmentKey,
    witness: VectorOpeningWitness,
) -> PedersenResult<VectorOpeningTranscript> {
    let prover = VectorOpeningProver::new(key, witness)?;
    let verifier = VectorOpeningVerifier::new(key, prover.statement()?)?;

    let (state, commitment) = prover.commit(rng)?;
    let challenge = verifier.challenge(rng);
    let response = prover.respond(state, &challenge)?;
    verifier.verify(&commitment, &challenge, &response)?;

    Ok(VectorOpeningTranscript {
        commitment,
        challenge,
        response,
    })
}

/// Accepting transcript for `statement` produced without any opening.
///
/// Picks `e`, `z` and `s` first and solves the verification equation for `C_0`.
/// The output is distributed exactly like an honest run.
pub fn simulate<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &CommitmentKey,
    statement: &VectorOpeningStatement,
) -> PedersenResult<VectorOpeningTranscript> {
    VectorOpeningVerifier::new(key, statement.clone())?;

    let challenge = random_scalar(rng);
    let z = Vector::random(rng, key.vector_length());
    let s = random_scalar(rng);

    let weighted = statement.aggregate(&GroupElement::identity(), &challenge)?;
    let blinding_commitment = key.commit_vector(&z, &s)? - weighted;

    Ok(VectorOpeningTranscript {
        commitment: VectorOpeningCommitment {
            blinding_commitment,
        },
        challenge,
        response: VectorOpeningResponse { z, s },
    })
}

impl VectorOpeningTranscript {
    /// Check this transcript against `statement`
    pub fn verify(
        &self,
        key: &CommitmentKey,
        statement: &VectorOpeningStatement,
    ) -> PedersenResult<()> {
        VectorOpeningVerifier::new(key, statement.clone())?.verify(
            &self.commitment,
            &self.challenge,
            &self.response,
        )
    }
}
