//! Escaping rules shared by the encrypted and plaintext line formats.
//!
//! Both formats are one entry per line with the key first, so a key must
//! never contain a raw line break or an unescaped separator, and must not
//! start like a comment. Values only need escaping in the plaintext format;
//! the encrypted format stores them as base64.
//!
//! Recognised escapes: `\\`, `\=`, `\:`, `\#`, `\!`, `\ `, `\t`, `\n`,
//! `\r`, `\f` and `\uXXXX` (UTF-16, surrogate pairs allowed). Any other
//! escaped character stands for itself.

/// Whitespace that the line formats treat as insignificant padding.
pub(crate) fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Escape a property key so it reads back as exactly one key.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    let last = key.chars().count().saturating_sub(1);
    for (i, c) in key.chars().enumerate() {
        match c {
            '=' | ':' => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            ' ' if i == 0 || i == last => out.push_str("\\ "),
            _ => push_common(&mut out, c),
        }
    }
    out
}

/// Escape a property value for the plaintext format.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let mut leading = true;
    for c in value.chars() {
        if leading && c == ' ' {
            out.push_str("\\ ");
            continue;
        }
        leading = false;
        push_common(&mut out, c);
    }
    out
}

fn push_common(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0c' => out.push_str("\\f"),
        _ => out.push(c),
    }
}

/// Resolve escapes in a raw key or value.
///
/// Returns a description of the problem for a dangling backslash or a
/// malformed `\u` sequence.
pub fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_utf16_unit(&mut chars)?;
                out.push(decode_unicode_escape(unit, &mut chars)?);
            }
            Some(other) => out.push(other),
            None => return Err("dangling '\\' at end of text".to_string()),
        }
    }
    Ok(out)
}

fn read_utf16_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return Err(format!("incomplete \\u escape '\\u{digits}'"));
    }
    u16::from_str_radix(&digits, 16).map_err(|_| format!("invalid \\u escape '\\u{digits}'"))
}

fn decode_unicode_escape(unit: u16, chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(u32::from(unit))
            .ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"));
    }
    // High surrogate: the low half must follow as another \u escape.
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(format!("unpaired surrogate \\u{unit:04X}"));
    }
    let low = read_utf16_unit(chars)?;
    char::decode_utf16([unit, low])
        .next()
        .and_then(|r| r.ok())
        .ok_or_else(|| format!("invalid surrogate pair \\u{unit:04X}\\u{low:04X}"))
}

/// Byte offset of the first separator in `line` that is not escaped.
pub(crate) fn find_separator(line: &str, separators: &[char]) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if separators.contains(&c) {
            return Some(i);
        }
    }
    None
}

/// Trim trailing blanks that are not themselves escaped.
pub(crate) fn trim_unescaped_end(raw: &str) -> &str {
    let mut end = raw.len();
    while let Some(c) = raw[..end].chars().next_back() {
        if !is_blank(c) {
            break;
        }
        let before = &raw[..end - c.len_utf8()];
        let slashes = before.bytes().rev().take_while(|b| *b == b'\\').count();
        if slashes % 2 == 1 {
            break;
        }
        end -= c.len_utf8();
    }
    &raw[..end]
}

/// Whether a physical line continues onto the next one.
pub(crate) fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}
