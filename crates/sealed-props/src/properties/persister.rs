//! Persisting property stores as sealed files.

use std::path::Path;

use zeroize::Zeroize;

use crate::atomic::write_atomic;
use crate::crypto::Encryptor;
use crate::error::Result;
use crate::properties::codec;
use crate::properties::store::PropertyStore;

/// Encrypt every value of `store` and write the sealed file to `path`.
///
/// The whole file is encoded in memory first, so an encryption failure on
/// any entry returns before the filesystem is touched. The write itself
/// goes through [`write_atomic`]: readers of `path` observe the previous
/// file or the complete new one, and a failed write leaves `path` as it
/// was.
///
/// # Errors
///
/// Returns `PropertiesError::Encryption` if a value cannot be encrypted or
/// `PropertiesError::Io` for filesystem errors.
pub fn store_properties<E: Encryptor + ?Sized>(
    path: &Path,
    store: &PropertyStore,
    comment: &str,
    encryptor: &E,
) -> Result<()> {
    let mut text = codec::encode(store, comment, encryptor)?;
    let result = write_atomic(path, text.as_bytes());
    text.zeroize();
    result?;

    log::info!("stored {} encrypted properties to {}", store.len(), path.display());
    Ok(())
}
