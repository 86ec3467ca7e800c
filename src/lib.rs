//! propsxls - .properties ⇄ Excel converter
//!
//! Translators prefer a spreadsheet, developers prefer per-language
//! `.properties` files. This library converts between the two:
//!
//! - Export: every `<base>_<lang>.properties` file below a working directory
//!   is merged into one workbook with a row per key and a column per language
//! - Import: the workbook is split back into one properties file per
//!   base name and language
//!
//! # Example
//!
//! ```no_run
//! use propsxls::converter::{export_to_workbook, import_from_workbook};
//! use std::path::Path;
//!
//! let languages = vec!["en".to_string(), "de".to_string()];
//! let report = export_to_workbook(
//!     Path::new("translations.xlsx"),
//!     Path::new("src/main/resources"),
//!     r".*\.properties$",
//!     &languages,
//! )?;
//! println!("Rows: {}", report.rows);
//!
//! import_from_workbook(Path::new("translations.xlsx"), Path::new("out"))?;
//! # Ok::<(), propsxls::error::ConvertError>(())
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod excel;
pub mod parser;
pub mod scanner;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use converter::{export_to_workbook, import_from_workbook};
pub use error::{ConvertError, ConvertResult};
pub use types::{ResourceKey, SourceFile, TranslationRow, TranslationTable};
