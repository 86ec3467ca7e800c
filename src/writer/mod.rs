//! `.properties` writer
//!
//! Output is plain ASCII: special characters are backslash-escaped and
//! everything outside printable ASCII becomes `\uXXXX`, so the files load
//! the same way regardless of the reader's default encoding.

use crate::error::{ConvertError, ConvertResult};
use std::fs;
use std::path::Path;

/// Write entries to `path`, creating parent directories as needed
pub fn write_properties_file(path: &Path, entries: &[(String, String)]) -> ConvertResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }
    fs::write(path, to_properties_string(entries)).map_err(|e| ConvertError::io(path, e))
}

/// Render entries as `key=value` lines
pub fn to_properties_string(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\\' | '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_properties;
    use tempfile::TempDir;

    fn entry(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_plain_entries() {
        let text = to_properties_string(&[entry("hello", "Hello"), entry("bye", "Bye")]);
        assert_eq!(text, "hello=Hello\nbye=Bye\n");
    }

    #[test]
    fn test_escapes_special_characters() {
        assert_eq!(escape("a=b:c#d!e\\f", false), "a\\=b\\:c\\#d\\!e\\\\f");
        assert_eq!(escape("line1\nline2\ttab", false), "line1\\nline2\\ttab");
    }

    #[test]
    fn test_spaces_in_keys_and_leading_value_spaces() {
        assert_eq!(escape("two words", true), "two\\ words");
        assert_eq!(escape(" padded value", false), "\\ padded value");
    }

    #[test]
    fn test_non_ascii_as_unicode_escapes() {
        assert_eq!(escape("Grüße", false), "Gr\\u00FC\\u00DFe");
        assert_eq!(escape("😀", false), "\\uD83D\\uDE00");
    }

    #[test]
    fn test_written_text_parses_back() {
        let entries = vec![
            entry("key with space", " leading"),
            entry("multi", "a\nb"),
            entry("unicode", "árvíztűrő tükörfúrógép"),
            entry("url", "http://x.org/?a=b#frag"),
        ];
        let parsed =
            parse_properties(&to_properties_string(&entries), Path::new("mem")).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/messages_en.properties");

        write_properties_file(&path, &[entry("k", "v")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "k=v\n");
    }
}
