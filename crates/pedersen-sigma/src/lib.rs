//! # Pedersen Sigma Protocols
//!
//! Interactive three-move (commit, challenge, response) arguments of knowledge
//! over Pedersen vector commitments `C = r*H + <x, G_vec>`:
//!
//! - [`vector_opening`]: knowledge of openings of `m` vector commitments,
//!   batched into a single response via the challenge powers `1, e, .., e^m`.
//!   Includes a transcript simulator and a rewinding extractor.
//! - [`inner_product`]: committed vectors `x`, `y` and a committed scalar `z`
//!   satisfy `z = <x, y>`, in one round with `O(n)` communication.
//!
//! Both protocols are honest-verifier zero knowledge. Challenges come from the
//! verifier's RNG; there is no Fiat-Shamir transform.
//!
//! ## Example
//!
//! ```
//! use pedersen_sigma::inner_product::{self, InnerProductWitness};
//! use pedersen_sigma::{CommitmentKey, GeneratorDeriver};
//! use rand::rngs::OsRng;
//!
//! let deriver = GeneratorDeriver::new();
//! let key = CommitmentKey::new(&deriver, 3).unwrap();
//! let witness = InnerProductWitness::random(&mut OsRng, 3);
//! let statement = witness.statement(&key).unwrap();
//!
//! let transcript = inner_product::run(&mut OsRng, &key, witness).unwrap();
//! assert!(transcript.verify(&key, &statement).is_ok());
//! ```

pub mod inner_product;
pub mod vector_opening;


pub use pedersen_core::{
    CommitmentKey, GeneratorDeriver, GroupElement, PedersenError, PedersenResult, Scalar, Vector,
    VectorOpening,
};
