//! Blinded inner-product prover

use crate::inner_product::{
    InnerProductCommitment, InnerProductResponse, InnerProductStatement, InnerProductWitness,
};
use pedersen_core::{random_scalar, CommitmentKey, InnerProduct, PedersenResult, Scalar, Vector};
use rand_core::{CryptoRng, RngCore};

/// Blinding material sampled in the first move, consumed by the response
#[derive(Debug, Clone)]
pub struct InnerProductProverState {
    dx: Vector<Scalar>,
    dy: Vector<Scalar>,
    rd: Scalar,
    sd: Scalar,
    t1: Scalar,
    t0: Scalar,
}

/// Prover knowing `x`, `y` and the blindings behind an inner-product statement
#[derive(Debug)]
pub struct InnerProductProver<'a> {
    key: &'a CommitmentKey,
    witness: InnerProductWitness,
}

impl<'a> InnerProductProver<'a> {
    pub fn new(key: &'a CommitmentKey, witness: InnerProductWitness) -> PedersenResult<Self> {
        witness.validate(key)?;
        Ok(Self { key, witness })
    }

    pub fn statement(&self) -> PedersenResult<InnerProductStatement> {
        self.witness.statement(self.key)
    }

    /// First move: commit to blinding vectors and to the coefficients of
    ///
    /// ```text
    /// t(e) = <e*x + dx, e*y + dy> = e^2*z + e*(<x, dy> + <y, dx>) + <dx, dy>
    /// ```
    #[tracing::instrument(skip_all, fields(n = self.key.vector_length()))]
    pub fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> PedersenResult<(InnerProductProverState, InnerProductCommitment)> {
        let n = self.key.vector_length();
        let state = InnerProductProverState {
            dx: Vector::random(rng, n),
            dy: Vector::random(rng, n),
            rd: random_scalar(rng),
            sd: random_scalar(rng),
            t1: random_scalar(rng),
            t0: random_scalar(rng),
        };

        let linear =
            self.witness.x.inner_product(&state.dy)? + self.witness.y.inner_product(&state.dx)?;
        let constant = state.dx.inner_product(&state.dy)?;

        let commitment = InnerProductCommitment {
            ad: self.key.commit_vector(&state.dx, &state.rd)?,
            bd: self.key.commit_vector(&state.dy, &state.sd)?,
            c1: self.key.commit_scalar(&linear, &state.t1),
            c0: self.key.commit_scalar(&constant, &state.t0),
        };
        Ok((state, commitment))
    }

    /// Third move: reveal the vectors and blindings masked by `e`
    #[tracing::instrument(skip_all)]
    pub fn respond(
        &self,
        state: InnerProductProverState,
        challenge: &Scalar,
    ) -> PedersenResult<InnerProductResponse> {
        let e = challenge;
        let w = &self.witness;
        Ok(InnerProductResponse {
            fx: w.x.scalar_multiply(e).checked_add(&state.dx)?,
            fy: w.y.scalar_multiply(e).checked_add(&state.dy)?,
            rx: w.r * e + state.rd,
            sy: w.s * e + state.sd,
            tz: w.t * e * e + state.t1 * e + state.t0,
        })
    }
}
