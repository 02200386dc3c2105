//! sealed-props — encrypted key/value configuration files.
//!
//! Loads property sets from plaintext or sealed files, lets callers amend
//! them in memory, and writes them back with every value encrypted under
//! ChaCha20-Poly1305. Keys stay readable; values never reach the disk in
//! clear text, and every write is atomic.
//!
//! All operations take their encryptor explicitly; there is no global key.

pub mod atomic;
pub mod crypto;
pub mod error;
pub mod properties;

// Re-export primary types
pub use crypto::{ChaChaEncryptor, CipherError, Encryptor, KeySource};
pub use error::{ErrorCategory, PropertiesError, Result};
pub use properties::{load_properties, store_properties, PropertyStore};
