//! SHA-256 fingerprints.

use sha2::{Digest, Sha256};

use agentforge_core::service::hash::ContentHasher;

/// Lowercase hex SHA-256. Bearer tokens are stored only as this digest and
/// client error messages are deduplicated by it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256ContentHasher;

impl Sha256ContentHasher {
    pub fn new() -> Self {
        Self
    }
}

impl ContentHasher for Sha256ContentHasher {
    fn compute_hash(&self, content: &str) -> String {
        format!("{:x}", Sha256::digest(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hash_known_value() {
        let hash = Sha256ContentHasher::new().compute_hash("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hash_distinguishes_tokens() {
        let hasher = Sha256ContentHasher::new();
        let a = hasher.compute_hash("af_0001");
        assert_eq!(a, hasher.compute_hash("af_0001"));
        assert_ne!(a, hasher.compute_hash("af_0002"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
