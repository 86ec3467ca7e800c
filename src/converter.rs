//! Properties ⇄ workbook conversion
//!
//! [`export_to_workbook`] merges every matching properties file under a
//! working directory into one [`TranslationTable`] and writes it as a
//! workbook. [`import_from_workbook`] reads the workbook back and writes one
//! properties file per base name and language.

use crate::error::{ConvertError, ConvertResult};
use crate::excel::{WorkbookExporter, WorkbookImporter};
use crate::parser;
use crate::scanner;
use crate::types::{ExportReport, ImportReport, ResourceKey, SourceFile, TranslationTable};
use crate::writer;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Extension of the files written on import
pub const PROPERTIES_EXTENSION: &str = "properties";

/// Export every matching properties file under `root` to `workbook`.
///
/// Only files carrying one of `languages` as suffix are exported. Malformed
/// files are skipped with a warning; unreadable files abort the export.
pub fn export_to_workbook(
    workbook: &Path,
    root: &Path,
    file_pattern: &str,
    languages: &[String],
) -> ConvertResult<ExportReport> {
    let pattern = Regex::new(file_pattern)?;
    let (table, report) = build_table(root, &pattern, languages)?;

    WorkbookExporter::new(&table).export(workbook)?;
    info!("Exported {} rows to {}", report.rows, workbook.display());
    Ok(report)
}

/// Collect and merge all matching properties files into a table
pub fn build_table(
    root: &Path,
    pattern: &Regex,
    languages: &[String],
) -> ConvertResult<(TranslationTable, ExportReport)> {
    let mut table = TranslationTable::new(languages.iter().cloned());
    if table.languages().is_empty() {
        return Err(ConvertError::Config(
            "at least one language is required for export".to_string(),
        ));
    }

    let scan = scanner::find_matching_files(root, pattern)?;
    let mut report = ExportReport {
        files_scanned: scan.files.len(),
        languages: table.languages().to_vec(),
        ..ExportReport::default()
    };

    for path in scan.files {
        let Some(source) = read_source_file(root, &path, table.languages())? else {
            report.files_skipped += 1;
            continue;
        };
        debug!(
            "{}: {} keys for '{}' [{}]",
            source.path.display(),
            source.entries.len(),
            source.base_name,
            source.language
        );
        merge_source_file(&mut table, source);
        report.files_exported += 1;
    }

    report.rows = table.len();
    Ok((table, report))
}

/// Load one matched file. `Ok(None)` means the file is skipped.
fn read_source_file(
    root: &Path,
    path: &Path,
    languages: &[String],
) -> ConvertResult<Option<SourceFile>> {
    let Some((base_name, language)) = scanner::resource_identity(root, path, languages) else {
        debug!("{}: no requested language suffix, skipped", path.display());
        return Ok(None);
    };

    match parser::parse_properties_file(path) {
        Ok(entries) => Ok(Some(SourceFile {
            path: path.to_path_buf(),
            base_name,
            language: language.to_string(),
            entries,
        })),
        Err(e) if e.is_recoverable() => {
            warn!("{}, file skipped", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn merge_source_file(table: &mut TranslationTable, source: SourceFile) {
    for (key, value) in source.entries {
        table.set(
            ResourceKey::new(source.base_name.as_str(), key),
            &source.language,
            value,
        );
    }
}

/// Import `workbook` and write its properties files beneath `root`
pub fn import_from_workbook(workbook: &Path, root: &Path) -> ConvertResult<ImportReport> {
    let imported = WorkbookImporter::new(workbook).import()?;
    let mut report = ImportReport {
        rows_read: imported.rows_read,
        rows_skipped: imported.rows_skipped,
        ..ImportReport::default()
    };

    let (files_written, rows_skipped) = write_table(&imported.table, root)?;
    report.files_written = files_written;
    report.rows_skipped += rows_skipped;
    Ok(report)
}

/// Write one properties file per (base name, language) with at least one
/// value. Returns the written paths and the number of rows left out because
/// their base name would resolve outside `root`.
pub fn write_table(table: &TranslationTable, root: &Path) -> ConvertResult<(Vec<PathBuf>, usize)> {
    let mut written = Vec::new();
    let mut rows_skipped = 0;

    for (base_name, rows) in table.group_by_base_name() {
        let Some(base_path) = resource_base_path(root, base_name) else {
            warn!("Base name '{}' is not a relative path, skipped", base_name);
            rows_skipped += rows.len();
            continue;
        };

        for language in table.languages() {
            let entries: Vec<(String, String)> = rows
                .iter()
                .filter_map(|row| {
                    row.value(language)
                        .map(|v| (row.key.property_key.clone(), v.to_string()))
                })
                .collect();
            if entries.is_empty() {
                debug!("'{}' has no '{}' values, no file written", base_name, language);
                continue;
            }

            let path = properties_path(&base_path, language);
            writer::write_properties_file(&path, &entries)?;
            info!("Wrote {} keys to {}", entries.len(), path.display());
            written.push(path);
        }
    }

    Ok((written, rows_skipped))
}

/// Resolve a `/`-separated base name beneath `root`.
///
/// Returns `None` for names that are empty, absolute, carry a drive prefix
/// or would leave `root`.
pub fn resource_base_path(root: &Path, base_name: &str) -> Option<PathBuf> {
    if base_name.starts_with(['/', '\\']) {
        return None;
    }
    let mut path = root.to_path_buf();
    let mut pushed = false;
    for segment in base_name.split(|c: char| c == '/' || c == '\\') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        // `C:` is a plain file name on Unix but a drive elsewhere
        if segment.contains(':') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {
                path.push(segment);
                pushed = true;
            }
            _ => return None,
        }
    }
    pushed.then_some(path)
}

/// `<dir>/<name>` + `en` → `<dir>/<name>_en.properties`
pub fn properties_path(base_path: &Path, language: &str) -> PathBuf {
    let name = base_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base_path.with_file_name(format!("{}_{}.{}", name, language, PROPERTIES_EXTENSION))
}
