//! # CLI Tools for Pedersen Sigma Protocols
//!
//! Prints generator fixture tables and runs in-process sessions of the
//! vector-opening proof and the blinded inner-product argument.

pub mod common;
pub mod generators;
pub mod prove;

use pedersen_core::PedersenError;
use thiserror::Error;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Protocol error: {0}")]
    PedersenError(#[from] PedersenError),
    #[error("Invalid command arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
