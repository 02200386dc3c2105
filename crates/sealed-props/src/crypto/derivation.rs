//! Key derivation using HKDF-SHA256.
//!
//! The master key supplied by the caller (key file, environment or
//! passphrase) is never used as a cipher key directly; a working key is
//! expanded from it under a fixed context string.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::error::{PropertiesError, Result};

/// HKDF context for the key that seals property values. Must remain stable
/// across versions or existing files become unreadable.
pub const PROPERTY_ENCRYPTION_CONTEXT: &str = "sealed-props/property-encryption";

/// Derive a 32-byte child key from a root key and context string.
///
/// Uses HKDF-SHA256 (RFC 5869) with the root key as IKM and
/// the context as info.
pub fn derive_key(root_key_bytes: &[u8; 32], context: &str) -> Result<[u8; 32]> {
    let hk = Hkdf::<Sha256>::new(None, root_key_bytes);
    let mut output = [0u8; 32];
    hk.expand(context.as_bytes(), &mut output)
        .map_err(|e| PropertiesError::InvalidKey(format!("HKDF expand failed: {e}")))?;
    Ok(output)
}
