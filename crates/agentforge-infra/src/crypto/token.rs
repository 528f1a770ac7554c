//! Random opaque bearer tokens.

use std::fmt::Write;

use agentforge_core::service::credential::TokenMinter;

use super::random_bytes;

/// Prefix that makes AgentForge tokens recognizable in logs and secret scanners.
pub const TOKEN_PREFIX: &str = "af_";

/// Mints `af_` followed by 32 bytes of OS randomness, hex-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenMinter;

impl TokenMinter for RandomTokenMinter {
    fn mint(&self) -> String {
        let bytes: [u8; 32] = random_bytes();
        bytes.iter().fold(TOKEN_PREFIX.to_string(), |mut token, b| {
            let _ = write!(token, "{b:02x}");
            token
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape_and_uniqueness() {
        let a = RandomTokenMinter.mint();
        let b = RandomTokenMinter.mint();
        assert!(a.starts_with(TOKEN_PREFIX));
        assert_eq!(a.len(), TOKEN_PREFIX.len() + 64);
        assert_ne!(a, b);
    }
}
