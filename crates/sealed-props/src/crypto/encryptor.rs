//! The `Encryptor` capability consumed by the codec, loader and persister.
//!
//! The engine never manages keys itself. Whatever implements this trait
//! holds the key; the engine only hands it bytes.

/// Failure reported by an [`Encryptor`].
///
/// The message must not contain plaintext or key material.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CipherError(pub String);

/// Symmetric encryption under a fixed key.
///
/// `decrypt(encrypt(p)) == p` must hold for every byte string `p`.
/// `decrypt` must fail, not return garbage, when the ciphertext was
/// produced under another key or has been modified.
pub trait Encryptor {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<E: Encryptor + ?Sized> Encryptor for &E {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

impl<E: Encryptor + ?Sized> Encryptor for Box<E> {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(ciphertext)
    }
}
