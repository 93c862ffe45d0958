//! `pedersen open` and `pedersen inner-product`: in-process protocol sessions

use crate::{common::SessionArgs, Result};
use clap::Args;
use pedersen_core::{scalar_to_hex, CommitmentKey, GeneratorDeriver, PedersenError, VectorOpening};
use pedersen_sigma::inner_product::{
    InnerProductChecks, InnerProductProver, InnerProductVerifier, InnerProductWitness,
};
use pedersen_sigma::vector_opening::{self, VectorOpeningWitness};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// Vector-opening command configuration
#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Number of batched commitments
    #[arg(short = 'm', long)]
    pub commitments: Option<usize>,
}

/// Inner-product command configuration
#[derive(Debug, Clone, Args)]
pub struct InnerProductArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Commit to `<x, y> + 1` instead of the true inner product
    #[arg(long)]
    pub tamper: bool,
}

/// One vector-opening session on fresh random openings
pub fn open_session<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &CommitmentKey,
    commitment_count: usize,
) -> Result<bool> {
    let openings = (0..commitment_count)
        .map(|_| VectorOpening::random(rng, key.vector_length()))
        .collect();
    match vector_opening::run(rng, key, VectorOpeningWitness::new(openings)) {
        Ok(transcript) => {
            tracing::debug!(challenge = %scalar_to_hex(&transcript.challenge), "opening accepted");
            Ok(true)
        }
        Err(PedersenError::VerificationFailed { .. }) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// One inner-product session on fresh random vectors.
///
/// With `tamper` the verifier holds `Cz + G`, a commitment to `z + 1` under the same blinding.
pub fn inner_product_session<R: RngCore + CryptoRng>(
    rng: &mut R,
    key: &CommitmentKey,
    tamper: bool,
) -> Result<InnerProductChecks> {
    let witness = InnerProductWitness::random(rng, key.vector_length());
    let prover = InnerProductProver::new(key, witness)?;

    let mut statement = prover.statement()?;
    if tamper {
        statement.cz = statement.cz + key.g;
    }
    let verifier = InnerProductVerifier::new(key, statement);

    let (state, commitment) = prover.commit(rng)?;
    let challenge = verifier.challenge(rng);
    tracing::debug!(challenge = %scalar_to_hex(&challenge), tamper, "challenge drawn");
    let response = prover.respond(state, &challenge)?;
    Ok(verifier.checks(&commitment, &challenge, &response)?)
}

pub fn handle_open_command(args: OpenArgs) -> Result<usize> {
    let mut config = args.session.resolve()?;
    if let Some(m) = args.commitments {
        config.commitment_count = m;
        config.validate()?;
    }

    let deriver = GeneratorDeriver::new();
    let key = config.commitment_key(&deriver)?;
    let mut rng = OsRng;

    let mut accepted = 0;
    for trial in 0..config.trials {
        let accept = open_session(&mut rng, &key, config.commitment_count)?;
        println!("trial {}: {}", trial, if accept { "accept" } else { "reject" });
        accepted += usize::from(accept);
    }

    tracing::info!(
        n = config.vector_length,
        m = config.commitment_count,
        accepted,
        trials = config.trials,
        "vector opening sessions finished"
    );
    Ok(accepted)
}

pub fn handle_inner_product_command(args: InnerProductArgs) -> Result<usize> {
    let config = args.session.resolve()?;
    let deriver = GeneratorDeriver::new();
    let key = config.commitment_key(&deriver)?;
    let mut rng = OsRng;

    let mut accepted = 0;
    for trial in 0..config.trials {
        let checks = inner_product_session(&mut rng, &key, args.tamper)?;
        match checks.first_failure() {
            None => println!("trial {}: accept", trial),
            Some(_) => println!(
                "trial {}: reject (x opening: {}, y opening: {}, inner product: {})",
                trial,
                verdict(checks.x_opening),
                verdict(checks.y_opening),
                verdict(checks.product)
            ),
        }
        accepted += usize::from(checks.all());
    }

    tracing::info!(
        n = config.vector_length,
        tamper = args.tamper,
        accepted,
        trials = config.trials,
        "inner product sessions finished"
    );
    Ok(accepted)
}

fn verdict(holds: bool) -> &'static str {
    if holds {
        "ok"
    } else {
        "FAILED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn session(trials: usize) -> SessionArgs {
        SessionArgs {
            config: None,
            length: None,
            trials: Some(trials),
        }
    }

    #[test]
    fn test_open_command_accepts_every_trial() {
        let args = OpenArgs {
            session: session(3),
            commitments: Some(4),
        };
        assert_eq!(handle_open_command(args).unwrap(), 3);
    }

    #[test]
    fn test_open_command_rejects_zero_commitments() {
        let args = OpenArgs {
            session: session(1),
            commitments: Some(0),
        };
        assert!(matches!(handle_open_command(args), Err(CliError::InvalidArguments(_))));
    }

    #[test]
    fn test_honest_inner_product() {
        let args = InnerProductArgs {
            session: session(2),
            tamper: false,
        };
        assert_eq!(handle_inner_product_command(args).unwrap(), 2);
    }

    #[test]
    fn test_tampered_product_fails_only_product_check() {
        let deriver = GeneratorDeriver::new();
        let key = CommitmentKey::new(&deriver, 3).unwrap();
        let checks = inner_product_session(&mut OsRng, &key, true).unwrap();
        assert!(checks.x_opening);
        assert!(checks.y_opening);
        assert!(!checks.product);

        let args = InnerProductArgs {
            session: session(2),
            tamper: true,
        };
        assert_eq!(handle_inner_product_command(args).unwrap(), 0);
    }
}
