//! Deterministic derivation of independent generator families
//!
//! Each family is identified by a label. Index 0 of every family is the curve
//! generator; index `i > 0` is found by hash-to-curve over the previous point:
//!
//! ```text
//! candidate = Keccak256(hex(x(B[i-1])) || label)
//! B[i]      = first point with x in candidate, candidate + 1, ...
//! ```
//!
//! `hex` is the lowercase big-endian encoding without leading zeros.
//!
//! Tables of the value family start at the shared generator (index 0); tables
//! of every other family start at their first hashed point (index 1), so entry
//! `j` of the blinding table is `derive("H", j + 1)`.

use crate::{GroupElement, PedersenError, PedersenResult, Vector};
use k256::elliptic_curve::bigint::{Encoding, U256};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Label of the value generator family (`G`)
pub const VALUE_LABEL: &str = "";

/// Label of the blinding generator family (`H`)
pub const BLINDING_LABEL: &str = "H";

/// Candidate x-coordinates tried before derivation gives up
pub const MAX_PROBES: usize = 1024;

/// Index of the first entry in the fixture table of `label`
pub fn table_start(label: &str) -> usize {
    if label == VALUE_LABEL {
        0
    } else {
        1
    }
}

/// Memoizing generator derivation service.
///
/// Construct once and share by reference. Entries are computed lazily, never
/// change once written, and concurrent callers that race on the same entry
/// compute identical points.
#[derive(Debug, Default)]
pub struct GeneratorDeriver {
    families: RwLock<HashMap<String, Vec<GroupElement>>>,
}

/// Coordinates of a generator family prefix, 64 hex characters per coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureTable(pub Vec<[String; 2]>);

impl GeneratorDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `index` of the family `label`
    pub fn derive(&self, label: &str, index: usize) -> PedersenResult<GroupElement> {
        let known = {
            let families = self.families.read().unwrap_or_else(PoisonError::into_inner);
            match families.get(label) {
                Some(family) if index < family.len() => return Ok(family[index]),
                Some(family) => family.last().copied().map(|last| (family.len(), last)),
                None => None,
            }
        };

        // Extend the chain outside the lock; only strictly lower indices are read.
        let (start, mut previous) = known.unwrap_or((1, GroupElement::generator()));
        let mut tail = Vec::with_capacity(index + 1 - start);
        if known.is_none() {
            tail.push(previous);
        }
        for i in start..=index {
            previous = next_generator(label, &previous, i)?;
            tail.push(previous);
        }

        let mut families = self.families.write().unwrap_or_else(PoisonError::into_inner);
        let family = families.entry(label.to_string()).or_default();
        let first = if known.is_none() { 0 } else { start };
        if family.len() < first + tail.len() {
            let skip = family.len() - first;
            family.extend_from_slice(&tail[skip..]);
        }
        Ok(family[index])
    }

    /// Points `1..=n` of the family `label`, the basis for length-`n` vector commitments
    pub fn derive_vector(&self, label: &str, n: usize) -> PedersenResult<Vector<GroupElement>> {
        if n > 0 {
            // Fill the cache in one pass.
            self.derive(label, n)?;
        }
        (1..=n)
            .map(|i| self.derive(label, i))
            .collect::<PedersenResult<Vec<_>>>()
            .map(Vector::new)
    }

    /// Number of points cached for `label`
    pub fn cached_len(&self, label: &str) -> usize {
        self.families
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(label)
            .map_or(0, Vec::len)
    }

    /// `count` points of the family `label` from [`table_start`] on, as hex coordinate pairs
    pub fn fixture_table(&self, label: &str, count: usize) -> PedersenResult<FixtureTable> {
        let start = table_start(label);
        (start..start + count)
            .map(|i| {
                let point = self.derive(label, i)?;
                let (x, y) = point.to_hex_coordinates().ok_or_else(|| {
                    PedersenError::InvalidParameters(format!(
                        "generator {label:?}[{i}] is the identity"
                    ))
                })?;
                Ok([x, y])
            })
            .collect::<PedersenResult<Vec<_>>>()
            .map(FixtureTable)
    }
}

/// Hash-to-curve step from `previous` to the point at `index`
fn next_generator(
    label: &str,
    previous: &GroupElement,
    index: usize,
) -> PedersenResult<GroupElement> {
    let mut hasher = Keccak256::new();
    hasher.update(minimal_hex(&previous.x_bytes()).as_bytes());
    hasher.update(label.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();

    let mut candidate = U256::from_be_bytes(digest);
    for attempt in 0..MAX_PROBES {
        match GroupElement::from_x(&candidate.to_be_bytes()) {
            Ok(point) => {
                tracing::trace!(label, index, attempts = attempt + 1, "derived generator");
                return Ok(point);
            }
            Err(PedersenError::NotOnCurve) => {
                tracing::trace!(label, index, attempt, "candidate x not on curve");
                candidate = candidate.wrapping_add(&U256::ONE);
            }
            Err(e) => return Err(e),
        }
    }

    Err(PedersenError::DerivationExhausted {
        label: label.to_string(),
        index,
        attempts: MAX_PROBES,
    })
}

/// Lowercase hex without leading zeros ("0" for zero)
fn minimal_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    match encoded.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    const FIXTURES: &str = include_str!("../fixtures/generators.json");

    fn fixtures() -> HashMap<String, FixtureTable> {
        serde_json::from_str(FIXTURES).unwrap()
    }

    #[test]
    fn test_index_zero_is_generator() {
        let deriver = GeneratorDeriver::new();
        assert_eq!(deriver.derive(VALUE_LABEL, 0).unwrap(), GroupElement::generator());
        assert_eq!(deriver.derive(BLINDING_LABEL, 0).unwrap(), GroupElement::generator());
    }

    #[test]
    fn test_value_family_matches_fixtures() {
        let deriver = GeneratorDeriver::new();
        let expected = &fixtures()["G"];
        assert_eq!(&deriver.fixture_table(VALUE_LABEL, 10).unwrap(), expected);
    }

    #[test]
    fn test_blinding_family_matches_fixtures() {
        let deriver = GeneratorDeriver::new();
        let expected = &fixtures()["H"];
        assert_eq!(&deriver.fixture_table(BLINDING_LABEL, 10).unwrap(), expected);
    }

    #[test]
    fn test_blinding_table_starts_at_first_hashed_point() {
        // Keccak256(hex(G.x) || "H") lands on a curve x-coordinate directly.
        let deriver = GeneratorDeriver::new();
        let table = deriver.fixture_table(BLINDING_LABEL, 2).unwrap();
        assert_eq!(
            table.0[0][0],
            "b60022c6bb8b8fe3e63d11b118a4200d83c620b5cc38324a4c46ad564fe853bf"
        );
        let (x2, _) = deriver.derive(BLINDING_LABEL, 2).unwrap().to_hex_coordinates().unwrap();
        assert_eq!(table.0[1][0], x2);
        assert_eq!(table_start(BLINDING_LABEL), 1);
        assert_eq!(table_start(VALUE_LABEL), 0);
    }

    #[test]
    fn test_value_chain_prefix() {
        let deriver = GeneratorDeriver::new();
        let table = deriver.fixture_table(VALUE_LABEL, 4).unwrap();
        assert!(table.0[1][0].starts_with("d208a940"));
        assert!(table.0[2][0].starts_with("d2b2edd8"));
        assert!(table.0[3][0].starts_with("4abe509c"));
    }

    #[test]
    fn test_derivation_is_order_independent() {
        // Jumping straight to a high index must agree with walking up to it.
        let direct = GeneratorDeriver::new();
        let stepwise = GeneratorDeriver::new();
        let high = direct.derive(BLINDING_LABEL, 7).unwrap();
        for i in 0..7 {
            stepwise.derive(BLINDING_LABEL, i).unwrap();
        }
        assert_eq!(stepwise.derive(BLINDING_LABEL, 7).unwrap(), high);
        assert_eq!(direct.derive(BLINDING_LABEL, 7).unwrap(), high);
        assert_eq!(direct.cached_len(BLINDING_LABEL), 8);
    }

    #[test]
    fn test_families_are_independent() {
        let deriver = GeneratorDeriver::new();
        let g = deriver.derive_vector(VALUE_LABEL, 4).unwrap();
        let h = deriver.derive_vector(BLINDING_LABEL, 4).unwrap();
        for point in g.iter() {
            assert!(!h.iter().any(|other| other == point));
        }
        assert_eq!(deriver.cached_len(VALUE_LABEL), 5);
        assert_eq!(deriver.cached_len("unused"), 0);
    }

    #[test]
    fn test_derive_vector_skips_index_zero() {
        let deriver = GeneratorDeriver::new();
        let basis = deriver.derive_vector(VALUE_LABEL, 3).unwrap();
        assert_eq!(basis.len(), 3);
        for i in 0..3 {
            assert_eq!(basis[i], deriver.derive(VALUE_LABEL, i + 1).unwrap());
        }
        assert!(deriver.derive_vector(VALUE_LABEL, 0).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_derivation_agrees() {
        let deriver = Arc::new(GeneratorDeriver::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let deriver = Arc::clone(&deriver);
                std::thread::spawn(move || {
                    let index = 5 + t % 2;
                    (index, deriver.derive("concurrent", index).unwrap())
                })
            })
            .collect();

        let reference = GeneratorDeriver::new();
        for handle in handles {
            let (index, point) = handle.join().unwrap();
            assert_eq!(point, reference.derive("concurrent", index).unwrap());
        }
        assert_eq!(deriver.cached_len("concurrent"), 7);
    }

    #[test]
    fn test_minimal_hex() {
        assert_eq!(minimal_hex(&[0x00, 0x0a, 0xbc]), "abc");
        assert_eq!(minimal_hex(&[0x00, 0x00]), "0");
        assert_eq!(minimal_hex(&[0xd2, 0x08]), "d208");
    }
}
