//! Symmetric encryption using ChaCha20-Poly1305 and passphrase-based
//! key derivation using Argon2id.
//!
//! [`ChaChaEncryptor`] is the stock [`Encryptor`] for sealed property files.
//! Each call to `encrypt` draws a fresh nonce, so one value sealed twice
//! yields two different blobs. The sealed layout is:
//!
//! ```text
//! nonce (12 bytes) || ciphertext || Poly1305 tag (16 bytes)
//! ```

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use zeroize::Zeroize;

use crate::crypto::derivation::{derive_key, PROPERTY_ENCRYPTION_CONTEXT};
use crate::crypto::encryptor::{CipherError, Encryptor};
use crate::crypto::random::fresh_nonce;
use crate::error::{PropertiesError, Result};

/// Argon2id parameters for passphrase-based key derivation.
const ARGON2_M_COST: u32 = 65536; // 64 MiB
const ARGON2_T_COST: u32 = 3; // 3 iterations
const ARGON2_P_COST: u32 = 4; // 4 parallel lanes

/// Length of a master or working key.
pub const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Derive a 32-byte master key from a passphrase and salt using Argon2id.
///
/// The salt must be at least 8 bytes.
pub fn derive_passphrase_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(KEY_LEN))
        .map_err(|e| PropertiesError::InvalidKey(format!("Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut output)
        .map_err(|e| PropertiesError::InvalidKey(format!("Argon2 hash: {e}")))?;

    Ok(output)
}

/// ChaCha20-Poly1305 [`Encryptor`] keyed from a 32-byte master key.
pub struct ChaChaEncryptor {
    key: [u8; KEY_LEN],
}

impl ChaChaEncryptor {
    /// Build an encryptor from raw master key bytes.
    ///
    /// # Errors
    ///
    /// Returns `PropertiesError::InvalidKey` unless `master` is exactly
    /// 32 bytes long.
    pub fn from_key_bytes(master: &[u8]) -> Result<Self> {
        let mut master: [u8; KEY_LEN] = master.try_into().map_err(|_| {
            PropertiesError::InvalidKey(format!(
                "expected {KEY_LEN} bytes of key material, got {}",
                master.len()
            ))
        })?;
        let key = derive_key(&master, PROPERTY_ENCRYPTION_CONTEXT);
        master.zeroize();
        Ok(Self { key: key? })
    }

    /// Build an encryptor from a passphrase via Argon2id.
    ///
    /// The same passphrase and salt always produce the same key; the salt
    /// must be stored by the caller.
    pub fn from_passphrase(passphrase: &str, salt: &[u8]) -> Result<Self> {
        let mut master = derive_passphrase_key(passphrase.as_bytes(), salt)?;
        let encryptor = Self::from_key_bytes(&master);
        master.zeroize();
        encryptor
    }
}

impl Encryptor for ChaChaEncryptor {
    fn encrypt(&self, plaintext: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        let nonce_bytes = fresh_nonce();
        let cipher = ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CipherError(format!("cipher init: {e}")))?;
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| CipherError(format!("encrypt: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, sealed: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError(format!(
                "ciphertext truncated: {} bytes, need at least {}",
                sealed.len(),
                NONCE_LEN + TAG_LEN
            )));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let cipher = ChaCha20Poly1305::new_from_slice(&self.key)
            .map_err(|e| CipherError(format!("cipher init: {e}")))?;
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError("authentication failed (wrong key or corrupted data)".into()))
    }
}

impl fmt::Debug for ChaChaEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaChaEncryptor").finish_non_exhaustive()
    }
}

impl Drop for ChaChaEncryptor {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
