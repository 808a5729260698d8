//! Canonical hashing with domain separation.
//!
//! Exactly one place defines canonical hashing for this workspace.
//! Algorithm: SHA-256; result format `"sha256:<hex_digest>"`. Domain
//! prefixes are null-terminated to prevent cross-domain collisions.

use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use strider_kernel::model::FactId;

/// Domain prefix for search-state fingerprints.
pub const DOMAIN_STATE: &[u8] = b"STRIDER::STATE::V1\0";

/// Domain prefix for plan artifact hashing.
pub const DOMAIN_PLAN: &[u8] = b"STRIDER::PLAN::V1\0";

/// Domain prefix for declaration artifact hashing.
pub const DOMAIN_DECLARATION: &[u8] = b"STRIDER::DECLARATION::V1\0";

/// Compute the canonical hash of a byte slice under a domain prefix.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// The canonical fingerprint of a fact set: the hash of its sorted fact
/// ids (a `BTreeSet` iterates in ascending order) as little-endian bytes.
///
/// Fact-set-equal states always fingerprint identically, which is what the
/// closed set relies on.
#[must_use]
pub fn state_fingerprint(state: &BTreeSet<FactId>) -> String {
    let mut bytes = Vec::with_capacity(state.len() * 8);
    for &id in state {
        bytes.extend_from_slice(&(id as u64).to_le_bytes());
    }
    canonical_hash(DOMAIN_STATE, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sets_fingerprint_equal() {
        let a: BTreeSet<FactId> = [3, 1, 2].into_iter().collect();
        let b: BTreeSet<FactId> = [1, 2, 3].into_iter().collect();
        assert_eq!(state_fingerprint(&a), state_fingerprint(&b));
    }

    #[test]
    fn different_sets_fingerprint_differently() {
        let a: BTreeSet<FactId> = [1, 2].into_iter().collect();
        let b: BTreeSet<FactId> = [1, 3].into_iter().collect();
        assert_ne!(state_fingerprint(&a), state_fingerprint(&b));
    }

    #[test]
    fn domain_separation_changes_the_digest() {
        assert_ne!(
            canonical_hash(DOMAIN_STATE, b"x"),
            canonical_hash(DOMAIN_PLAN, b"x")
        );
    }

    #[test]
    fn format_is_algorithm_prefixed_hex() {
        let h = state_fingerprint(&BTreeSet::new());
        assert!(h.starts_with("sha256:"));
        assert_eq!(h.len(), "sha256:".len() + 64);
    }
}
