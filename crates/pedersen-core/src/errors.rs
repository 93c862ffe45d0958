//! Error types for commitment and sigma-protocol operations

use thiserror::Error;

/// Main error type for Pedersen commitment and proof operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PedersenError {
    /// Binary vector operation on operands of different lengths
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// No curve point has the candidate x-coordinate
    #[error("No point on the curve has the candidate x-coordinate")]
    NotOnCurve,

    /// Hash-to-curve probing ran out of candidates
    #[error("No curve point found for generator {label:?}[{index}] after {attempts} probes")]
    DerivationExhausted {
        label: String,
        index: usize,
        attempts: usize,
    },

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A verification equation did not hold
    #[error("Proof verification failed: {check} check does not hold")]
    VerificationFailed { check: &'static str },

    /// Witness extraction from transcripts was impossible
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Result type for Pedersen operations
pub type PedersenResult<T> = Result<T, PedersenError>;
