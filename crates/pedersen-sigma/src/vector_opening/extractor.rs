//! Witness extraction from rewound vector-opening transcripts
//!
//! Given `m + 1` accepting transcripts that share the first message `C_0` and
//! use pairwise distinct challenges `e_0..e_m`, the responses satisfy
//!
//! ```text
//! z_j = sum_i e_j^i * x_i      s_j = sum_i e_j^i * r_i      (i = 0..m)
//! ```
//!
//! The matrix `V[j][i] = e_j^i` is Vandermonde and therefore invertible, so
//! every `(x_i, r_i)` is recovered as `V^-1` applied to the responses.

use crate::vector_opening::{VectorOpeningStatement, VectorOpeningTranscript, VectorOpeningVerifier};
use pedersen_core::{CommitmentKey, PedersenError, PedersenResult, Scalar, Vector, VectorOpening};

/// Openings recovered by [`extract`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedOpenings {
    /// The prover's blind `(x_0, r_0)` behind `C_0`
    pub blind: VectorOpening,
    /// `(x_i, r_i)` for `C_1..C_m`
    pub openings: Vec<VectorOpening>,
}

/// Recover every opening from `m + 1` transcripts on the same first message
#[tracing::instrument(skip_all, fields(m = statement.len(), transcripts = transcripts.len()))]
pub fn extract(
    key: &CommitmentKey,
    statement: &VectorOpeningStatement,
    transcripts: &[VectorOpeningTranscript],
) -> PedersenResult<ExtractedOpenings> {
    let m = statement.len();
    if transcripts.len() < m + 1 {
        return Err(PedersenError::ExtractionFailed(format!(
            "need {} transcripts, got {}",
            m + 1,
            transcripts.len()
        )));
    }
    let transcripts = &transcripts[..=m];

    let first = transcripts[0].commitment;
    if transcripts.iter().any(|t| t.commitment != first) {
        return Err(PedersenError::ExtractionFailed(
            "transcripts do not share a first message".to_string(),
        ));
    }

    let verifier = VectorOpeningVerifier::new(key, statement.clone())?;
    for (j, t) in transcripts.iter().enumerate() {
        verifier
            .verify(&t.commitment, &t.challenge, &t.response)
            .map_err(|_| {
                PedersenError::ExtractionFailed(format!("transcript {j} is not accepting"))
            })?;
    }

    let challenges: Vec<Scalar> = transcripts.iter().map(|t| t.challenge).collect();
    for (j, e) in challenges.iter().enumerate() {
        if challenges[..j].contains(e) {
            return Err(PedersenError::ExtractionFailed(format!(
                "challenge {j} repeats an earlier challenge"
            )));
        }
    }

    let vandermonde = challenges
        .iter()
        .map(|e| Vector::powers(e, m).into_inner())
        .collect();
    let inverse = invert_matrix(vandermonde).ok_or_else(|| {
        PedersenError::ExtractionFailed("challenge matrix is singular".to_string())
    })?;

    let mut recovered = Vec::with_capacity(m + 1);
    for row in &inverse {
        let mut opening = VectorOpening::new(Vector::zeros(key.vector_length()), Scalar::ZERO);
        for (coefficient, t) in row.iter().zip(transcripts) {
            let response = VectorOpening::new(t.response.z.clone(), t.response.s);
            opening = opening.add(&response.scale(coefficient))?;
        }
        recovered.push(opening);
    }

    let blind = recovered.remove(0);
    if blind.commit(key)? != first.blinding_commitment {
        return Err(PedersenError::ExtractionFailed(
            "recovered blind does not open the first message".to_string(),
        ));
    }
    for (i, (opening, commitment)) in recovered.iter().zip(&statement.commitments).enumerate() {
        if opening.commit(key)? != *commitment {
            return Err(PedersenError::ExtractionFailed(format!(
                "recovered opening {} does not open its commitment",
                i + 1
            )));
        }
    }

    Ok(ExtractedOpenings {
        blind,
        openings: recovered,
    })
}

/// Gauss-Jordan inversion over the scalar field, `None` if singular
fn invert_matrix(mut a: Vec<Vec<Scalar>>) -> Option<Vec<Vec<Scalar>>> {
    let n = a.len();
    let mut inverse: Vec<Vec<Scalar>> = (0..n)
        .map(|i| {
            let mut row = vec![Scalar::ZERO; n];
            row[i] = Scalar::ONE;
            row
        })
        .collect();

    for col in 0..n {
        let pivot = (col..n).find(|&r| a[r][col] != Scalar::ZERO)?;
        a.swap(col, pivot);
        inverse.swap(col, pivot);

        let pivot_inv = Option::<Scalar>::from(a[col][col].invert())?;
        for k in 0..n {
            a[col][k] *= pivot_inv;
            inverse[col][k] *= pivot_inv;
        }

        for r in 0..n {
            let factor = a[r][col];
            if r == col || factor == Scalar::ZERO {
                continue;
            }
            for k in 0..n {
                let a_ck = a[col][k];
                let inv_ck = inverse[col][k];
                a[r][k] -= factor * a_ck;
                inverse[r][k] -= factor * inv_ck;
            }
        }
    }

    Some(inverse)
}
