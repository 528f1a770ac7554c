//! ContentHasher trait for fingerprinting content.
//!
//! The `Sha256ContentHasher` adapter lives in agentforge-infra.

/// Abstraction over content hashing.
///
/// Used to fingerprint bearer tokens before storage and to deduplicate
/// client error reports.
pub trait ContentHasher: Send + Sync {
    /// Compute a hex-encoded hash of the given content.
    fn compute_hash(&self, content: &str) -> String;
}
