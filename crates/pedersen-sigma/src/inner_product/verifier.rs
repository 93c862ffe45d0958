//! Blinded inner-product verifier

use crate::inner_product::{
    InnerProductChecks, InnerProductCommitment, InnerProductResponse, InnerProductStatement,
};
use pedersen_core::{
    random_scalar, CommitmentKey, InnerProduct, PedersenError, PedersenResult, Scalar,
};
use rand_core::{CryptoRng, RngCore};

/// Verifier holding `Cx`, `Cy` and `Cz`
#[derive(Debug)]
pub struct InnerProductVerifier<'a> {
    key: &'a CommitmentKey,
    statement: InnerProductStatement,
}

impl<'a> InnerProductVerifier<'a> {
    pub fn new(key: &'a CommitmentKey, statement: InnerProductStatement) -> Self {
        Self { key, statement }
    }

    pub fn statement(&self) -> &InnerProductStatement {
        &self.statement
    }

    /// Second move: a uniformly random challenge
    pub fn challenge<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        random_scalar(rng)
    }

    /// Evaluate the three verification equations independently.
    ///
    /// Fails only when the response vectors do not match the key's length.
    #[tracing::instrument(skip_all, fields(n = self.key.vector_length()))]
    pub fn checks(
        &self,
        commitment: &InnerProductCommitment,
        challenge: &Scalar,
        response: &InnerProductResponse,
    ) -> PedersenResult<InnerProductChecks> {
        let e = challenge;
        let key = self.key;
        let InnerProductStatement { cx, cy, cz } = self.statement;

        let x_opening = cx * e + commitment.ad == key.commit_vector(&response.fx, &response.rx)?;
        let y_opening = cy * e + commitment.bd == key.commit_vector(&response.fy, &response.sy)?;

        // <fx, fy> is t(e), so this holds iff C1, C0 commit to coefficients consistent with z.
        let blinded_product = response.fx.inner_product(&response.fy)?;
        let product = key.commit_scalar(&blinded_product, &response.tz)
            == cz * (e * e) + commitment.c1 * e + commitment.c0;

        Ok(InnerProductChecks {
            x_opening,
            y_opening,
            product,
        })
    }

    /// Accept iff all three equations hold; otherwise name the first failing one
    pub fn verify(
        &self,
        commitment: &InnerProductCommitment,
        challenge: &Scalar,
        response: &InnerProductResponse,
    ) -> PedersenResult<()> {
        let checks = self.checks(commitment, challenge, response)?;
        match checks.first_failure() {
            None => Ok(()),
            Some(check) => {
                tracing::debug!(?checks, "inner product argument rejected");
                Err(PedersenError::VerificationFailed { check })
            }
        }
    }
}
