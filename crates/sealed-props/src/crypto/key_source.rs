//! Key material resolution.
//!
//! Front ends name *where* the master key comes from; this module turns
//! that into a ready [`ChaChaEncryptor`]. Nothing here is cached or global:
//! every resolution reads its source afresh.
//!
//! Key files and key environment variables hold a 32-byte key encoded as
//! standard base64. Surrounding whitespace is ignored.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, Zeroizing};

use crate::atomic::write_atomic;
use crate::crypto::encryption::{ChaChaEncryptor, KEY_LEN};
use crate::crypto::random::fresh_master_key;
use crate::error::{PropertiesError, Result};

/// Where the master key comes from.
pub enum KeySource {
    /// A file containing the base64 key.
    File(PathBuf),
    /// An environment variable containing the base64 key.
    Env(String),
    /// A passphrase stretched with Argon2id under the given salt.
    Passphrase { passphrase: String, salt: Vec<u8> },
}

impl KeySource {
    /// Read the key material and build an encryptor from it.
    ///
    /// # Errors
    ///
    /// Returns `PropertiesError::FileNotFound` for a missing key file,
    /// `PropertiesError::InvalidKey` for an unset variable, bad base64 or a
    /// key of the wrong length, or `PropertiesError::Io` for other
    /// filesystem errors.
    pub fn resolve(&self) -> Result<ChaChaEncryptor> {
        match self {
            KeySource::File(path) => read_key_file(path),
            KeySource::Env(var) => {
                let encoded = Zeroizing::new(std::env::var(var).map_err(|_| {
                    PropertiesError::InvalidKey(format!(
                        "environment variable {var} is not set or not unicode"
                    ))
                })?);
                encryptor_from_base64(&encoded)
            }
            KeySource::Passphrase { passphrase, salt } => {
                ChaChaEncryptor::from_passphrase(passphrase, salt)
            }
        }
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::File(path) => f.debug_tuple("File").field(path).finish(),
            KeySource::Env(var) => f.debug_tuple("Env").field(var).finish(),
            KeySource::Passphrase { .. } => f.write_str("Passphrase { .. }"),
        }
    }
}

impl Drop for KeySource {
    fn drop(&mut self) {
        if let KeySource::Passphrase { passphrase, .. } = self {
            passphrase.zeroize();
        }
    }
}

/// Load an encryptor from a base64 key file.
pub fn read_key_file(path: &Path) -> Result<ChaChaEncryptor> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => Zeroizing::new(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PropertiesError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    encryptor_from_base64(&contents)
}

/// Generate a random master key and write it to `path` as base64.
///
/// The file is written atomically and is readable by its owner only on
/// Unix. An existing file at `path` is replaced; callers that must not
/// clobber a key check first.
pub fn generate_key_file(path: &Path) -> Result<()> {
    let mut key = fresh_master_key();
    let mut encoded = STANDARD.encode(key);
    key.zeroize();
    encoded.push('\n');

    let result = write_atomic(path, encoded.as_bytes());
    encoded.zeroize();
    result?;

    log::info!("wrote new key file {}", path.display());
    Ok(())
}

fn encryptor_from_base64(encoded: &str) -> Result<ChaChaEncryptor> {
    let bytes = Zeroizing::new(
        STANDARD
            .decode(encoded.trim())
            .map_err(|e| PropertiesError::InvalidKey(format!("key is not valid base64: {e}")))?,
    );
    if bytes.len() != KEY_LEN {
        return Err(PropertiesError::InvalidKey(format!(
            "key must decode to {KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    ChaChaEncryptor::from_key_bytes(&bytes)
}
