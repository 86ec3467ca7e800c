//! Properties file discovery.
//!
//! Walks the working directory, keeps files whose *file name* matches the
//! user's pattern and works out which resource and language each file
//! belongs to.
//!
//! ## Naming convention
//!
//! `<dir>/<stem>_<lang>.<ext>` belongs to language `<lang>` when `<lang>` is
//! one of the requested languages. The resource's base name is
//! `<dir>/<stem>`, relative to the working directory and `/`-separated.
//! When several requested languages fit (`pt_BR` and `BR`) the longest wins.

use crate::error::{ConvertError, ConvertResult};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files matched under a root, in a stable order
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    /// Entries that could not be read while walking
    pub skipped_count: usize,
}

/// Recursively list files under `root` whose name matches `pattern`.
///
/// Entries are visited sorted by file name so two runs over the same tree
/// produce the same order.
pub fn find_matching_files(root: &Path, pattern: &Regex) -> ConvertResult<ScanResult> {
    if !root.is_dir() {
        return Err(ConvertError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "working directory not found"),
        ));
    }

    let mut result = ScanResult::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                result.skipped_count += 1;
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if pattern.is_match(&name) {
            debug!("Matched {}", entry.path().display());
            result.files.push(entry.into_path());
        }
    }
    Ok(result)
}

/// Base name and language of a matched file, or `None` when the file name
/// carries no requested language suffix
pub fn resource_identity<'a>(
    root: &Path,
    path: &Path,
    languages: &'a [String],
) -> Option<(String, &'a str)> {
    let stem = path.file_stem()?.to_string_lossy();
    let (base_stem, language) = split_language(&stem, languages)?;

    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    segments.push(base_stem.to_string());

    Some((segments.join("/"), language))
}

/// Split `messages_en` into (`messages`, `en`) using the requested languages
pub fn split_language<'s, 'l>(stem: &'s str, languages: &'l [String]) -> Option<(&'s str, &'l str)> {
    languages
        .iter()
        .filter_map(|lang| {
            let base = stem.strip_suffix(lang.as_str())?.strip_suffix('_')?;
            (!base.is_empty()).then_some((base, lang.as_str()))
        })
        .max_by_key(|(_, lang)| lang.len())
}
