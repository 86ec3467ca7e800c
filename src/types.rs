use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

//==============================================================================
// Resource identity
//==============================================================================

/// Identifies one translatable string: the resource it lives in and its key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    /// Path of the resource relative to the working directory, `/`-separated,
    /// with language suffix and extension stripped (e.g. `web/messages`)
    pub base_name: String,
    /// Key inside the properties file
    pub property_key: String,
}

impl ResourceKey {
    pub fn new(base_name: impl Into<String>, property_key: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            property_key: property_key.into(),
        }
    }
}

//==============================================================================
// Translation table
//==============================================================================

/// One row of the table: a key and its value per language
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRow {
    pub key: ResourceKey,
    values: HashMap<String, String>,
}

impl TranslationRow {
    pub fn new(key: ResourceKey) -> Self {
        Self {
            key,
            values: HashMap::new(),
        }
    }

    /// Value for a language; `None` when absent or empty
    pub fn value(&self, language: &str) -> Option<&str> {
        self.values
            .get(language)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value for a language, empty string when untranslated
    pub fn cell(&self, language: &str) -> &str {
        self.value(language).unwrap_or("")
    }

    pub fn has_any_value(&self) -> bool {
        self.values.values().any(|v| !v.is_empty())
    }
}

/// Merged view of every key across every language.
///
/// Rows keep first-seen order and are unique by [`ResourceKey`]. Columns are
/// the language list the table was created with, in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTable {
    languages: Vec<String>,
    rows: Vec<TranslationRow>,
    index: HashMap<ResourceKey, usize>,
}

impl TranslationTable {
    /// Create an empty table. Duplicate languages keep their first position.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for lang in languages {
            let lang = lang.into();
            if !unique.contains(&lang) {
                unique.push(lang);
            }
        }
        Self {
            languages: unique,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&TranslationRow> {
        self.index.get(key).map(|&idx| &self.rows[idx])
    }

    /// Ensure a row exists for `key` without setting any value
    pub fn ensure_row(&mut self, key: ResourceKey) -> &mut TranslationRow {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.rows.len();
                self.index.insert(key.clone(), idx);
                self.rows.push(TranslationRow::new(key));
                idx
            }
        };
        &mut self.rows[idx]
    }

    /// Set one cell, creating the row on first sight.
    ///
    /// Returns `false` (and leaves the table untouched) when `language` is
    /// not one of the table's columns.
    pub fn set(&mut self, key: ResourceKey, language: &str, value: impl Into<String>) -> bool {
        if !self.has_language(language) {
            return false;
        }
        let row = self.ensure_row(key);
        row.values.insert(language.to_string(), value.into());
        true
    }

    /// Distinct base names in first-seen order
    pub fn base_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.key.base_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Rows grouped by base name in one pass. Groups follow first-seen order
    /// and rows keep table order within a group.
    pub fn group_by_base_name(&self) -> Vec<(&str, Vec<&TranslationRow>)> {
        let mut groups: Vec<(&str, Vec<&TranslationRow>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for row in &self.rows {
            let name = row.key.base_name.as_str();
            let idx = *positions.entry(name).or_insert_with(|| {
                groups.push((name, Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push(row);
        }
        groups
    }
}

//==============================================================================
// Source files
//==============================================================================

/// A properties file discovered on disk during export
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub base_name: String,
    pub language: String,
    pub entries: Vec<(String, String)>,
}

//==============================================================================
// Reports
//==============================================================================

/// Summary of one export run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Files whose name matched the pattern
    pub files_scanned: usize,
    /// Files merged into the table
    pub files_exported: usize,
    /// Matched files left out (no requested language, or malformed)
    pub files_skipped: usize,
    /// Rows written below the header
    pub rows: usize,
    pub languages: Vec<String>,
}

/// Summary of one import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub files_written: Vec<PathBuf>,
    /// Data rows read from the worksheet
    pub rows_read: usize,
    /// Rows ignored because their base name was blank or unsafe
    pub rows_skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_dedupes_languages() {
        let table = TranslationTable::new(["en", "de", "en"]);
        assert_eq!(table.languages(), ["en", "de"]);
    }

    #[test]
    fn test_set_creates_row_once() {
        let mut table = TranslationTable::new(["en", "de"]);
        assert!(table.set(ResourceKey::new("greeting", "hello"), "en", "Hello"));
        assert!(table.set(ResourceKey::new("greeting", "hello"), "de", "Hallo"));

        assert_eq!(table.len(), 1);
        let row = table.get(&ResourceKey::new("greeting", "hello")).unwrap();
        assert_eq!(row.cell("en"), "Hello");
        assert_eq!(row.cell("de"), "Hallo");
    }

    #[test]
    fn test_set_ignores_unknown_language() {
        let mut table = TranslationTable::new(["en"]);
        assert!(!table.set(ResourceKey::new("greeting", "hello"), "fr", "Bonjour"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_and_empty_cells_read_as_untranslated() {
        let mut table = TranslationTable::new(["en", "de"]);
        table.set(ResourceKey::new("a", "k"), "en", "");
        let row = table.get(&ResourceKey::new("a", "k")).unwrap();
        assert_eq!(row.value("en"), None);
        assert_eq!(row.value("de"), None);
        assert_eq!(row.cell("de"), "");
        assert!(!row.has_any_value());
    }

    #[test]
    fn test_rows_keep_first_seen_order() {
        let mut table = TranslationTable::new(["en"]);
        table.set(ResourceKey::new("b", "z"), "en", "1");
        table.set(ResourceKey::new("a", "y"), "en", "2");
        table.set(ResourceKey::new("b", "x"), "en", "3");
        table.set(ResourceKey::new("b", "z"), "en", "4");

        let keys: Vec<&str> = table
            .rows()
            .iter()
            .map(|r| r.key.property_key.as_str())
            .collect();
        assert_eq!(keys, ["z", "y", "x"]);
        assert_eq!(table.base_names(), ["b", "a"]);
    }

    #[test]
    fn test_group_by_base_name() {
        let mut table = TranslationTable::new(["en"]);
        table.set(ResourceKey::new("b", "z"), "en", "1");
        table.set(ResourceKey::new("a", "y"), "en", "2");
        table.set(ResourceKey::new("b", "x"), "en", "3");

        let groups: Vec<(&str, Vec<&str>)> = table
            .group_by_base_name()
            .into_iter()
            .map(|(name, rows)| {
                let keys: Vec<&str> = rows
                    .into_iter()
                    .map(|r| r.key.property_key.as_str())
                    .collect();
                (name, keys)
            })
            .collect();
        assert_eq!(groups, vec![("b", vec!["z", "x"]), ("a", vec!["y"])]);
        assert!(TranslationTable::new(["en"]).group_by_base_name().is_empty());
    }
}
