//! Plaintext `key=value` format, used to import existing configuration and
//! to export a decrypted copy.
//!
//! The reader accepts the common subset of Java `.properties` syntax:
//! `#`/`!` comments, `=` or `:` separators with optional surrounding
//! blanks, backslash escapes, and backslash line continuation. Unlike Java,
//! a line without a separator is an error rather than a key with an empty
//! value.

use chrono::Utc;

use crate::error::{PropertiesError, Result};
use crate::properties::codec::{encode_header, is_comment_or_blank};
use crate::properties::escape::{
    ends_with_continuation, escape_key, escape_value, find_separator, is_blank,
    trim_unescaped_end, unescape,
};
use crate::properties::store::PropertyStore;

/// Parse plaintext properties.
///
/// # Errors
///
/// Returns `PropertiesError::Parse` with the 1-based line number of the
/// first entry that has no separator or contains a bad escape.
pub fn parse_plaintext(text: &str) -> Result<PropertyStore> {
    let mut store = PropertyStore::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        if is_comment_or_blank(line) {
            continue;
        }
        let line_no = idx + 1;

        let mut logical = line.trim_start_matches(is_blank).to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_pair(&logical)
            .map_err(|reason| PropertiesError::Parse { line: line_no, reason })?;
        if store.add(key, value).is_some() {
            log::warn!("line {line_no}: duplicate property, keeping the later value");
        }
    }
    Ok(store)
}

fn split_pair(logical: &str) -> std::result::Result<(String, String), String> {
    let split = find_separator(logical, &['=', ':'])
        .ok_or_else(|| "expected 'key=value' (no '=' or ':' separator)".to_string())?;

    let key = unescape(trim_unescaped_end(&logical[..split]))?;
    let value = unescape(logical[split + 1..].trim_start_matches(is_blank))?;
    Ok((key, value))
}

/// Render a store as plaintext properties, header first.
///
/// The output contains every value in clear text; callers decide where it
/// may go.
pub fn write_plaintext(store: &PropertyStore, comment: &str) -> String {
    let mut text = encode_header(comment, Utc::now());
    text.push('\n');
    for (key, value) in store.iter() {
        text.push_str(&escape_key(key));
        text.push('=');
        text.push_str(&escape_value(value));
        text.push('\n');
    }
    text
}
