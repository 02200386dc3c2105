//! Encrypted line format.
//!
//! A sealed properties file is UTF-8 text:
//!
//! ```text
//! # Encrypted Properties File generated by sprops 2026-10-19T08:30:00Z
//! db.user=AAECAwQFBgcICQoL...
//! db.password=DA0ODxAREhMUFRYX...
//! ```
//!
//! The header is one or more `#` lines carrying the caller's comment. The
//! first of them ends with the RFC 3339 timestamp. Each entry line is the
//! escaped key, `=`, then the standard base64 of the sealed value. Keys stay
//! readable so files remain greppable and diffable; only values are
//! encrypted. Blank lines and `#`/`!` comment lines are ignored on decode.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use zeroize::Zeroize;

use crate::crypto::Encryptor;
use crate::error::{PropertiesError, Result};
use crate::properties::escape::{escape_key, find_separator, is_blank, unescape};
use crate::properties::store::PropertyStore;

/// Encode one property as a sealed line (no trailing newline).
///
/// # Errors
///
/// Returns `PropertiesError::Encryption` if the encryptor rejects the value.
pub fn encode_entry<E: Encryptor + ?Sized>(
    key: &str,
    value: &str,
    encryptor: &E,
) -> Result<String> {
    let sealed = encryptor
        .encrypt(value.as_bytes())
        .map_err(|e| PropertiesError::Encryption(format!("property '{key}': {e}")))?;
    Ok(format!("{}={}", escape_key(key), STANDARD.encode(sealed)))
}

/// Decode one sealed line back into `(key, value)`.
///
/// `line_no` is the 1-based position of the line in its file and is only
/// used for error reporting. The caller filters out blank and comment lines
/// (see [`is_comment_or_blank`]).
///
/// # Errors
///
/// - `MalformedLine` if there is no unescaped `=`.
/// - `Decoding` if the key escapes or the base64 are invalid, or if the
///   decrypted bytes are not UTF-8.
/// - `Decryption` if the encryptor rejects the ciphertext.
pub fn decode_entry<E: Encryptor + ?Sized>(
    line_no: usize,
    line: &str,
    encryptor: &E,
) -> Result<(String, String)> {
    let line = line.trim_start_matches(is_blank);
    let split =
        find_separator(line, &['=']).ok_or(PropertiesError::MalformedLine { line: line_no })?;

    let key = unescape(&line[..split]).map_err(|reason| PropertiesError::Decoding {
        line: line_no,
        reason: format!("key: {reason}"),
    })?;

    let blob = line[split + 1..].trim();
    let sealed = STANDARD.decode(blob).map_err(|e| PropertiesError::Decoding {
        line: line_no,
        reason: format!("value of '{key}' is not valid base64: {e}"),
    })?;

    let plaintext = encryptor
        .decrypt(&sealed)
        .map_err(|e| PropertiesError::Decryption {
            line: line_no,
            reason: format!("value of '{key}': {e}"),
        })?;

    let value = String::from_utf8(plaintext).map_err(|e| {
        e.into_bytes().zeroize();
        PropertiesError::Decoding {
            line: line_no,
            reason: format!("decrypted value of '{key}' is not valid UTF-8"),
        }
    })?;

    Ok((key, value))
}

/// Whether a physical line carries no entry.
pub fn is_comment_or_blank(line: &str) -> bool {
    let line = line.trim_start_matches(is_blank);
    line.is_empty() || line.starts_with('#') || line.starts_with('!')
}

/// Build the header block for `comment` stamped with `timestamp`.
///
/// The first line is `# <comment> <timestamp>`. Every further line break in
/// the comment starts a new `# ` line, so no part of the comment can be read
/// back as an entry.
pub fn encode_header(comment: &str, timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut parts = comment
        .split(|c| c == '\r' || c == '\n')
        .map(str::trim_end)
        .filter(|part| !part.is_empty());

    let mut header = match parts.next() {
        Some(first) => format!("# {first} {stamp}"),
        None => format!("# {stamp}"),
    };
    for part in parts {
        header.push_str("\n# ");
        header.push_str(part);
    }
    header
}

/// Serialize a whole store, header first, entries in store order.
///
/// Nothing is returned unless every value encrypted successfully.
pub fn encode<E: Encryptor + ?Sized>(
    store: &PropertyStore,
    comment: &str,
    encryptor: &E,
) -> Result<String> {
    let mut text = encode_header(comment, Utc::now());
    text.push('\n');
    for (key, value) in store.iter() {
        text.push_str(&encode_entry(key, value, encryptor)?);
        text.push('\n');
    }
    Ok(text)
}

/// Parse a whole sealed file.
///
/// Any bad line fails the whole decode; no partial store is returned. A
/// repeated key keeps its last value.
pub fn decode<E: Encryptor + ?Sized>(text: &str, encryptor: &E) -> Result<PropertyStore> {
    let mut store = PropertyStore::new();
    for (idx, line) in text.lines().enumerate() {
        if is_comment_or_blank(line) {
            continue;
        }
        let (key, value) = decode_entry(idx + 1, line, encryptor)?;
        if store.contains_key(&key) {
            log::warn!(
                "line {}: duplicate property '{key}', keeping the later value",
                idx + 1
            );
        }
        store.add(key, value);
    }
    Ok(store)
}
