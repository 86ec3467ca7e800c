//! Excel import/export for translation tables
//!
//! - Export: TranslationTable → Excel (.xlsx)
//! - Import: Excel (.xlsx) → TranslationTable
//!
//! The workbook holds one worksheet. Row 1 is the header: `baseName`, `key`,
//! then one language code per column. Every further row is one translation
//! key; a blank cell means the key has no translation in that language.

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::{ImportedWorkbook, WorkbookImporter};

/// Name of the single worksheet written on export
pub const SHEET_NAME: &str = "translations";

/// Header of the base name column (column A)
pub const BASE_NAME_HEADER: &str = "baseName";

/// Header of the property key column (column B)
pub const KEY_HEADER: &str = "key";
