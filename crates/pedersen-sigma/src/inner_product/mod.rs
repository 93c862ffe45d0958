//! # Blinded Inner-Product Argument
//!
//! Proves that committed vectors `x`, `y` and a committed scalar `z` satisfy
//! `z = <x, y>` without revealing any of them. Single round, `O(n)` messages:
//!
//! 1. Prover samples blinding vectors `dx`, `dy` and scalars `rd`, `sd`, `t1`, `t0`
//!    and sends
//!    ```text
//!    Ad = rd*H + <dx, G_vec>            Bd = sd*H + <dy, G_vec>
//!    C1 = t1*H + (<x, dy> + <y, dx>)*G  C0 = t0*H + <dx, dy>*G
//!    ```
//! 2. Verifier sends a random challenge `e`.
//! 3. Prover reveals `fx = e*x + dx`, `fy = e*y + dy`, `rx = e*r + rd`,
//!    `sy = e*s + sd` and `tz = e^2*t + e*t1 + t0`.
//!
//! The verifier checks
//!
//! ```text
//! Cx*e + Ad == rx*H + <fx, G_vec>
//! Cy*e + Bd == sy*H + <fy, G_vec>
//! tz*H + <fx, fy>*G == Cz*e^2 + C1*e + C0
//! ```
//!
//! A false claim about `z` makes the degree-2 polynomial `<fx, fy>` disagree
//! with the committed coefficients at all but a negligible fraction of `e`.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

use pedersen_core::{CommitmentKey, PedersenResult};
use rand_core::{CryptoRng, RngCore};

/// Run all three moves in-process with a random challenge and verify the result
#[tracing::instrument(skip_all, fields(n = key.vector_length()))]
pub fn run<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &CommitmentKey,
    witness: InnerProductWitness,
) -> PedersenResult<InnerProductTranscript> {
    let prover = InnerProductProver::new(key, witness)?;
    let verifier = InnerProductVerifier::new(key, prover.statement()?);

    let (state, commitment) = prover.commit(rng)?;
    let challenge = verifier.challenge(rng);
    let response = prover.respond(state, &challenge)?;
    verifier.verify(&commitment, &challenge, &response)?;

    Ok(InnerProductTranscript {
        commitment,
        challenge,
        response,
    })
}

impl InnerProductTranscript {
    /// Check this transcript against `statement`
    pub fn verify(
        &self,
        key: &CommitmentKey,
        statement: &InnerProductStatement,
    ) -> PedersenResult<()> {
        InnerProductVerifier::new(key, *statement).verify(
            &self.commitment,
            &self.challenge,
            &self.response,
        )
    }

    /// Evaluate each equation of this transcript against `statement`
    pub fn checks(
        &self,
        key: &CommitmentKey,
        statement: &InnerProductStatement,
    ) -> PedersenResult<InnerProductChecks> {
        InnerProductVerifier::new(key, *statement).checks(
            &self.commitment,
            &self.challenge,
            &self.response,
        )
    }
}
