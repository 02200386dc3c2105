//! Loading property stores from disk.

use std::path::Path;

use zeroize::Zeroize;

use crate::crypto::Encryptor;
use crate::error::{PropertiesError, Result};
use crate::properties::codec;
use crate::properties::plaintext::parse_plaintext;
use crate::properties::store::PropertyStore;

/// Load a property store.
///
/// - `path == None` starts a fresh, empty store; `encrypted` is ignored.
/// - `encrypted == Some(false)` reads plaintext `key=value` properties.
/// - `encrypted == Some(true)` or `None` reads a sealed file, decrypting
///   every value with `encryptor`.
///
/// An existing but empty file yields an empty store. A bad line anywhere
/// aborts the load; no partially populated store is ever returned.
///
/// # Errors
///
/// Returns `PropertiesError::FileNotFound` if `path` does not exist,
/// `PropertiesError::Io` if it cannot be read, `PropertiesError::Parse` for
/// malformed plaintext, or `MalformedLine`, `Decoding` or `Decryption` for a
/// bad sealed file. Text that is not UTF-8 counts as malformed: `Parse` for
/// plaintext, `Decoding` for a sealed file.
pub fn load_properties<E: Encryptor + ?Sized>(
    path: Option<&Path>,
    encrypted: Option<bool>,
    encryptor: &E,
) -> Result<PropertyStore> {
    let Some(path) = path else {
        log::debug!("no input file, starting an empty property store");
        return Ok(PropertyStore::new());
    };
    let encrypted = encrypted.unwrap_or(true);
    log::debug!(
        "loading {} properties from {}",
        if encrypted { "encrypted" } else { "plaintext" },
        path.display()
    );

    let mut text = read_text(path, encrypted)?;
    let result = if encrypted {
        codec::decode(&text, encryptor)
    } else {
        parse_plaintext(&text)
    };
    if !encrypted {
        text.zeroize();
    }

    let store = result?;
    log::info!("loaded {} properties from {}", store.len(), path.display());
    Ok(store)
}

/// Read `path` as UTF-8. Text that is not UTF-8 is malformed input, reported
/// at the line holding the first bad byte.
fn read_text(path: &Path, encrypted: bool) -> Result<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PropertiesError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    String::from_utf8(bytes).map_err(|e| {
        let valid = e.utf8_error().valid_up_to();
        let mut bytes = e.into_bytes();
        let line = bytes[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
        bytes.zeroize();
        let reason = format!("invalid UTF-8 at byte {valid}");
        if encrypted {
            PropertiesError::Decoding { line, reason }
        } else {
            PropertiesError::Parse { line, reason }
        }
    })
}
