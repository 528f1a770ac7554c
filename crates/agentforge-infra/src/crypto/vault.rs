//! Provider keys at rest: AES-256-GCM under a per-installation master key.
//!
//! The master key lives base64-encoded in `vault.key` inside the data
//! directory and is generated on first start. A sealed value is
//! `base64(nonce || ciphertext)` with a fresh 96-bit nonce per seal.

use std::io::ErrorKind;
use std::path::Path;

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use agentforge_core::service::credential::SecretCipher;
use agentforge_types::error::SettingError;

use super::random_bytes;

/// File name of the master key inside the data directory.
pub const KEY_FILE_NAME: &str = "vault.key";

const NONCE_LEN: usize = 12;

/// Problems loading or creating the master key. Never carries key bytes.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cannot access vault key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("vault key file {0} is not a base64-encoded 32-byte key")]
    Malformed(String),
}

pub struct VaultCrypto {
    cipher: Aes256Gcm,
}

impl VaultCrypto {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: Aes256Gcm::new(key.into()),
        }
    }

    /// Load the master key at `path`, creating it (mode 0600) if missing.
    pub fn from_key_file(path: &Path) -> Result<Self, VaultError> {
        let io = |source| VaultError::Io {
            path: path.display().to_string(),
            source,
        };

        let encoded = match std::fs::read_to_string(path) {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let key: [u8; 32] = random_bytes();
                if let Some(dir) = path.parent() {
                    std::fs::create_dir_all(dir).map_err(io)?;
                }
                std::fs::write(path, STANDARD.encode(key)).map_err(io)?;
                owner_only(path).map_err(io)?;
                tracing::info!(path = %path.display(), "generated vault key");
                return Ok(Self::new(&key));
            }
            Err(e) => return Err(io(e)),
        };

        let key: [u8; 32] = STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| VaultError::Malformed(path.display().to_string()))?;
        Ok(Self::new(&key))
    }
}

impl SecretCipher for VaultCrypto {
    fn seal(&self, plaintext: &str) -> Result<String, SettingError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| SettingError::Encryption)?;
        let mut sealed = nonce.to_vec();
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    fn open(&self, sealed: &str) -> Result<String, SettingError> {
        let bytes = STANDARD.decode(sealed).map_err(|_| SettingError::Decryption)?;
        if bytes.len() <= NONCE_LEN {
            return Err(SettingError::Decryption);
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| SettingError::Decryption)?;
        String::from_utf8(plaintext).map_err(|_| SettingError::Decryption)
    }
}

#[cfg(unix)]
fn owner_only(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn owner_only(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
