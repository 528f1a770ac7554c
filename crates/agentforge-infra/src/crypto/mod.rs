//! Cryptographic operations for AgentForge.
//!
//! - `hash`: SHA-256 fingerprints for bearer tokens and client errors
//! - `password`: Argon2id password hashing
//! - `token`: random opaque bearer tokens
//! - `vault`: AES-256-GCM encryption for provider keys at rest

pub mod hash;
pub mod password;
pub mod token;
pub mod vault;

use aes_gcm::aead::OsRng;
use aes_gcm::aead::rand_core::RngCore;

/// `N` bytes from the operating system's CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}
