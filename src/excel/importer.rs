//! Excel importer implementation - .xlsx → TranslationTable

use super::{BASE_NAME_HEADER, KEY_HEADER};
use crate::error::{ConvertError, ConvertResult};
use crate::types::{ResourceKey, TranslationTable};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Table read back from a workbook, with row bookkeeping
#[derive(Debug)]
pub struct ImportedWorkbook {
    pub table: TranslationTable,
    /// Non-blank data rows seen below the header
    pub rows_read: usize,
    /// Rows dropped because their base name was blank
    pub rows_skipped: usize,
}

/// Excel importer for translation workbooks
pub struct WorkbookImporter {
    path: PathBuf,
}

impl WorkbookImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the first worksheet into a table
    pub fn import(&self) -> ConvertResult<ImportedWorkbook> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            ConvertError::Workbook(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ConvertError::InvalidWorkbook("workbook has no worksheets".to_string()))?
            .map_err(|e| ConvertError::Workbook(format!("Failed to read worksheet: {}", e)))?;

        self.process_sheet(&range)
    }

    fn process_sheet(&self, range: &Range<Data>) -> ConvertResult<ImportedWorkbook> {
        if range.is_empty() || range.start() != Some((0, 0)) {
            return Err(ConvertError::InvalidWorkbook(format!(
                "expected '{}' and '{}' header cells starting at A1",
                BASE_NAME_HEADER, KEY_HEADER
            )));
        }

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|cells| cells.iter().map(|c| cell_text(c).trim().to_string()).collect())
            .unwrap_or_default();
        let language_columns = parse_header(&header)?;
        debug!(
            "Language columns: {:?}",
            language_columns.iter().map(|(_, l)| l).collect::<Vec<_>>()
        );

        let mut table = TranslationTable::new(language_columns.iter().map(|(_, l)| l.clone()));
        let mut rows_read = 0;
        let mut rows_skipped = 0;

        // Data rows (skip header row)
        for (offset, cells) in rows.enumerate() {
            let excel_row = offset + 2;
            if cells.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            rows_read += 1;

            let base_name = cells.first().map(cell_text).unwrap_or_default();
            let property_key = cells.get(1).map(cell_text).unwrap_or_default();
            // A blank key cell is the empty key, which properties files allow
            if base_name.trim().is_empty() {
                warn!("Row {}: missing base name, skipped", excel_row);
                rows_skipped += 1;
                continue;
            }

            let key = ResourceKey::new(base_name, property_key);
            if table.get(&key).is_some() {
                warn!(
                    "Row {}: duplicate key '{}' in '{}', later values win",
                    excel_row, key.property_key, key.base_name
                );
            }
            table.ensure_row(key.clone());

            for (col, language) in &language_columns {
                let value = cells.get(*col).map(cell_text).unwrap_or_default();
                if !value.is_empty() {
                    table.set(key.clone(), language, value);
                }
            }
        }

        Ok(ImportedWorkbook {
            table,
            rows_read,
            rows_skipped,
        })
    }
}

/// Map header cells to `(column index, language)` pairs.
///
/// The first two cells must be the base name and key headers. Blank or
/// unusable language headers mark columns that are ignored.
fn parse_header(header: &[String]) -> ConvertResult<Vec<(usize, String)>> {
    let matches = |idx: usize, expected: &str| {
        header
            .get(idx)
            .is_some_and(|h| h.eq_ignore_ascii_case(expected))
    };
    if !matches(0, BASE_NAME_HEADER) || !matches(1, KEY_HEADER) {
        return Err(ConvertError::InvalidWorkbook(format!(
            "header must start with '{}' and '{}', found {:?}",
            BASE_NAME_HEADER,
            KEY_HEADER,
            header.iter().take(2).collect::<Vec<_>>()
        )));
    }

    let mut columns: Vec<(usize, String)> = Vec::new();
    for (idx, language) in header.iter().enumerate().skip(2) {
        if language.is_empty() {
            continue;
        }
        if !is_valid_language(language) {
            warn!("Column {}: '{}' is not a usable language code, ignored", idx + 1, language);
            continue;
        }
        if columns.iter().any(|(_, l)| l == language) {
            warn!("Column {}: language '{}' repeated, ignored", idx + 1, language);
            continue;
        }
        columns.push((idx, language.clone()));
    }
    Ok(columns)
}

/// Language codes end up in file names
fn is_valid_language(language: &str) -> bool {
    language
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Cell content as text; numbers typed by translators keep their display form
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_header_languages() {
        let columns = parse_header(&header(&["baseName", "key", "en", "", "de"])).unwrap();
        assert_eq!(columns, vec![(2, "en".to_string()), (4, "de".to_string())]);
    }

    #[test]
    fn test_parse_header_case_insensitive() {
        let columns = parse_header(&header(&["BASENAME", "Key", "hu"])).unwrap();
        assert_eq!(columns, vec![(2, "hu".to_string())]);
    }

    #[test]
    fn test_parse_header_rejects_unknown_layout() {
        assert!(parse_header(&header(&["key", "en", "de"])).is_err());
        assert!(parse_header(&header(&["baseName"])).is_err());
        assert!(parse_header(&[]).is_err());
    }

    #[test]
    fn test_parse_header_ignores_unsafe_and_repeated_languages() {
        let columns =
            parse_header(&header(&["baseName", "key", "en", "../x", "en", "pt_BR"])).unwrap();
        assert_eq!(columns, vec![(2, "en".to_string()), (5, "pt_BR".to_string())]);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Hallo".to_string())), "Hallo");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }
}
