//! Cryptographic primitives for sealed-props.
//!
//! This module provides:
//! - The `Encryptor` capability the engine is written against
//! - ChaCha20-Poly1305 authenticated encryption (`ChaChaEncryptor`)
//! - Argon2id passphrase-based key derivation
//! - HKDF-SHA256 working-key derivation
//! - Key material resolution from files, environment and passphrases
//! - Cryptographically secure random number generation

pub mod derivation;
pub mod encryption;
pub mod encryptor;
pub mod key_source;
pub mod random;

pub use encryption::ChaChaEncryptor;
pub use encryptor::{CipherError, Encryptor};
pub use key_source::{generate_key_file, read_key_file, KeySource};
