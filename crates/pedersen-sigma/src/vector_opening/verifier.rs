//! Batched vector-opening verifier

use crate::vector_opening::{VectorOpeningCommitment, VectorOpeningResponse, VectorOpeningStatement};
use pedersen_core::{random_scalar, CommitmentKey, PedersenError, PedersenResult, Scalar};
use rand_core::{CryptoRng, RngCore};

/// Verifier holding the public commitments `C_1..C_m`
#[derive(Debug)]
pub struct VectorOpeningVerifier<'a> {
    key: &'a CommitmentKey,
    statement: VectorOpeningStatement,
}

impl<'a> VectorOpeningVerifier<'a> {
    pub fn new(key: &'a CommitmentKey, statement: VectorOpeningStatement) -> PedersenResult<Self> {
        if statement.is_empty() {
            return Err(PedersenError::InvalidParameters(
                "at least one commitment is required".to_string(),
            ));
        }
        if key.vector_length() == 0 {
            return Err(PedersenError::InvalidParameters(
                "vectors must be non-empty".to_string(),
            ));
        }
        Ok(Self { key, statement })
    }

    pub fn statement(&self) -> &VectorOpeningStatement {
        &self.statement
    }

    /// Second move: a uniformly random challenge
    pub fn challenge<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        random_scalar(rng)
    }

    /// Accept iff `sum_i e^i * C_i == s*H + <z, G_vec>`
    #[tracing::instrument(skip_all, fields(m = self.statement.len()))]
    pub fn verify(
        &self,
        commitment: &VectorOpeningCommitment,
        challenge: &Scalar,
        response: &VectorOpeningResponse,
    ) -> PedersenResult<()> {
        let lhs = self
            .statement
            .aggregate(&commitment.blinding_commitment, challenge)?;
        let rhs = self.key.commit_vector(&response.z, &response.s)?;

        if lhs != rhs {
            tracing::debug!("aggregate opening does not match");
            return Err(PedersenError::VerificationFailed {
                check: "aggregate opening",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_opening::{VectorOpeningProver, VectorOpeningWitness};
    use pedersen_core::{GeneratorDeriver, Vector, VectorOpening};
    use rand::rngs::OsRng;

    fn setup(n: usize, m: usize) -> (CommitmentKey, VectorOpeningWitness) {
        let mut rng = OsRng;
        let deriver = GeneratorDeriver::new();
        let key = CommitmentKey::new(&deriver, n).unwrap();
        let openings = (0..m).map(|_| VectorOpening::random(&mut rng, n)).collect();
        (key, VectorOpeningWitness::new(openings))
    }

    #[test]
    fn test_vector_length_3_two_commitments() {
        let mut rng = OsRng;
        let (key, witness) = setup(3, 2);
        let prover = VectorOpeningProver::new(&key, witness).unwrap();
        let verifier = VectorOpeningVerifier::new(&key, prover.statement().unwrap()).unwrap();

        let (state, commitment) = prover.commit(&mut rng).unwrap();
        let e = verifier.challenge(&mut rng);
        let response = prover.respond(state, &e).unwrap();

        assert!(verifier.verify(&commitment, &e, &response).is_ok());
    }

    #[test]
    fn test_wrong_z_rejected() {
        let mut rng = OsRng;
        let (key, witness) = setup(3, 2);
        let prover = VectorOpeningProver::new(&key, witness).unwrap();
        let verifier = VectorOpeningVerifier::new(&key, prover.statement().unwrap()).unwrap();

        let (state, commitment) = prover.commit(&mut rng).unwrap();
        let e = verifier.challenge(&mut rng);
        let mut response = prover.respond(state, &e).unwrap();
        response.z = response
            .z
            .checked_add(&Vector::new(vec![Scalar::ONE, Scalar::ZERO, Scalar::ZERO]))
            .unwrap();

        assert_eq!(
            verifier.verify(&commitment, &e, &response),
            Err(PedersenError::VerificationFailed {
                check: "aggregate opening"
            })
        );
    }

    #[test]
    fn test_response_for_other_challenge_rejected() {
        let mut rng = OsRng;
        let (key, witness) = setup(2, 3);
        let prover = VectorOpeningProver::new(&key, witness).unwrap();
        let verifier = VectorOpeningVerifier::new(&key, prover.statement().unwrap()).unwrap();

        let (state, commitment) = prover.commit(&mut rng).unwrap();
        let e = verifier.challenge(&mut rng);
        let response = prover.respond(state, &e).unwrap();

        assert!(verifier.verify(&commitment, &(e + Scalar::ONE), &response).is_err());
    }

    #[test]
    fn test_unrelated_statement_rejected() {
        let mut rng = OsRng;
        let (key, witness) = setup(2, 2);
        let (_, other) = setup(2, 2);
        let prover = VectorOpeningProver::new(&key, witness).unwrap();
        let verifier = VectorOpeningVerifier::new(&key, other.statement(&key).unwrap()).unwrap();

        let (state, commitment) = prover.commit(&mut rng).unwrap();
        let e = verifier.challenge(&mut rng);
        let response = prover.respond(state, &e).unwrap();

        assert!(verifier.verify(&commitment, &e, &response).is_err());
    }

    #[test]
    fn test_short_response_is_length_error() {
        let mut rng = OsRng;
        let (key, witness) = setup(3, 1);
        let prover = VectorOpeningProver::new(&key, witness).unwrap();
        let verifier = VectorOpeningVerifier::new(&key, prover.statement().unwrap()).unwrap();

        let (_, commitment) = prover.commit(&mut rng).unwrap();
        let response = VectorOpeningResponse {
            z: Vector::zeros(2),
            s: Scalar::ZERO,
        };
        assert!(matches!(
            verifier.verify(&commitment, &Scalar::ONE, &response),
            Err(PedersenError::VectorLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_statement_rejected() {
        let (key, _) = setup(3, 1);
        assert!(VectorOpeningVerifier::new(&key, VectorOpeningStatement::new(vec![])).is_err());
    }

    #[test]
    fn test_zero_length_key_rejected() {
        let deriver = GeneratorDeriver::new();
        let key = CommitmentKey::new(&deriver, 0).unwrap();
        // r*H opens under an empty G_vec for any r
        let statement = VectorOpeningStatement::new(vec![key.h]);
        assert!(matches!(
            VectorOpeningVerifier::new(&key, statement),
            Err(PedersenError::InvalidParameters(_))
        ));
    }
}
