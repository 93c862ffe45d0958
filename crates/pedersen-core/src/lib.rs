//! # Pedersen Core
//!
//! This crate provides the algebra shared by the Pedersen sigma protocols:
//!
//! - Group operations over secp256k1 and random scalar sampling
//! - Deterministic, memoized derivation of independent generator families
//! - Fixed-length homomorphic vectors with a type-dispatched inner product
//! - Pedersen commitments to scalars and scalar vectors
//! - Error types
//!
//! ## Mathematical Background
//!
//! Commitments live in a prime-order group with bases:
//! - `G`: value generator (the curve generator)
//! - `H`: blinding generator, derived independently of `G`
//! - `{G_i}`: vector of value generators for vector commitments
//!
//! A vector commitment to `x` with blinding `r` is
//! ```text
//! C = r*H + <x, G_vec>
//! ```
//! which is hiding for uniform `r` and binding as long as no discrete-log
//! relation between the bases is known.

pub mod commitment;
pub mod errors;
pub mod generators;
pub mod group;
pub mod vector;


pub use commitment::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use vector::*;

/// Re-export commonly used types from k256
pub use k256::Scalar;
