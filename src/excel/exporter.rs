//! Excel exporter implementation - TranslationTable → .xlsx

use super::{BASE_NAME_HEADER, KEY_HEADER, SHEET_NAME};
use crate::error::{ConvertError, ConvertResult};
use crate::types::TranslationTable;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Writes a translation table as a single-sheet workbook:
/// `baseName | key | <lang 1> | <lang 2> | ...`
pub struct WorkbookExporter<'a> {
    table: &'a TranslationTable,
}

impl<'a> WorkbookExporter<'a> {
    pub fn new(table: &'a TranslationTable) -> Self {
        Self { table }
    }

    /// Export the table to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> ConvertResult<()> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet();
        self.write_sheet(worksheet)?;

        workbook.save(output_path).map_err(|e| {
            ConvertError::Workbook(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    fn write_sheet(&self, worksheet: &mut Worksheet) -> ConvertResult<()> {
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| ConvertError::Workbook(format!("Failed to set worksheet name: {}", e)))?;

        // Header row (row 0)
        let header_format = Format::new().set_bold();
        let headers = [BASE_NAME_HEADER, KEY_HEADER]
            .into_iter()
            .chain(self.table.languages().iter().map(String::as_str));
        for (col_idx, header) in headers.enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, header, &header_format)
                .map_err(|e| ConvertError::Workbook(format!("Failed to write header: {}", e)))?;
        }
        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|e| ConvertError::Workbook(format!("Failed to freeze header: {}", e)))?;

        // Data rows (starting at row 1). Untranslated cells stay blank; the
        // identity cells are always written since `""` is a valid key.
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            let identity = [row.key.base_name.as_str(), row.key.property_key.as_str()];
            let values = self.table.languages().iter().map(|lang| row.cell(lang));

            for (col_idx, text) in identity.into_iter().chain(values).enumerate() {
                if col_idx >= 2 && text.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(excel_row, col_idx as u16, text)
                    .map_err(|e| {
                        ConvertError::Workbook(format!(
                            "Failed to write cell at row {} ('{}' / '{}'): {}",
                            excel_row + 1,
                            row.key.base_name,
                            row.key.property_key,
                            e
                        ))
                    })?;
            }
        }

        worksheet.autofit();
        Ok(())
    }
}
