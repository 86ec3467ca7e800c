//! `.properties` reader
//!
//! Follows the `java.util.Properties` line format: `#`/`!` comments,
//! backslash line continuations, `=`, `:` or whitespace separators and
//! `\uXXXX` escapes. Files are read as UTF-8, falling back to ISO-8859-1
//! for legacy files that are not valid UTF-8.

use crate::error::{ConvertError, ConvertResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Ordered key/value pairs of one properties file
pub type Entries = Vec<(String, String)>;

/// Read and parse a properties file from disk
pub fn parse_properties_file(path: &Path) -> ConvertResult<Entries> {
    let bytes = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    parse_properties(&decode(bytes), path)
}

/// Parse properties content. `path` is only used for error messages.
///
/// A key seen twice keeps its first position and takes the last value.
pub fn parse_properties(content: &str, path: &Path) -> ConvertResult<Entries> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut entries: Entries = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let mut lines = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let trimmed = raw.trim_start_matches(is_whitespace);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_whitespace)),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, path, line_no)?;
        let value = unescape(raw_value, path, line_no)?;

        match positions.get(&key) {
            Some(&pos) => entries[pos].1 = value,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push((key, value));
            }
        }
    }

    Ok(entries)
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// A line continues when it ends with an odd number of backslashes
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator: Option<char> = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                separator = Some(c);
                break;
            }
            c if is_whitespace(c) => {
                key_end = i;
                separator = Some(c);
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let Some(sep) = separator else {
        return (key, "");
    };

    let mut rest = line[key_end + sep.len_utf8()..].trim_start_matches(is_whitespace);
    // "key = value": whitespace ended the key, the '=' is still ahead
    if is_whitespace(sep) {
        if let Some(after) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
            rest = after.trim_start_matches(is_whitespace);
        }
    }
    (key, rest)
}

fn unescape(raw: &str, path: &Path, line: usize) -> ConvertResult<String> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\x0c',
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        return Err(ConvertError::Format {
                            path: path.to_path_buf(),
                            line,
                            message: format!("malformed \\uxxxx escape: \\u{}", hex),
                        });
                    }
                    let unit = u16::from_str_radix(&hex, 16).map_err(|e| ConvertError::Format {
                        path: path.to_path_buf(),
                        line,
                        message: e.to_string(),
                    })?;
                    units.push(unit);
                    continue;
                }
                Some(other) => other,
                None => break,
            }
        } else {
            c
        };
        units.extend_from_slice(c.encode_utf16(&mut buf));
    }

    // Lone surrogates are legal in Java properties but not in a Rust String
    Ok(String::from_utf16_lossy(&units))
}
