use crate::converter;
use crate::error::ConvertResult;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the export function
pub fn export(
    workbook: PathBuf,
    working_directory: PathBuf,
    file_pattern: String,
    languages: Vec<String>,
) -> ConvertResult<()> {
    println!("{}", "📤 propsxls - Export".bold().green());
    println!("   Working directory: {}", working_directory.display());
    println!("   Pattern:           {}", file_pattern);
    println!("   Languages:         {}", languages.join(", "));
    println!("   Output:            {}\n", workbook.display());

    let report =
        converter::export_to_workbook(&workbook, &working_directory, &file_pattern, &languages)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!(
        "   {} files matched, {} exported, {} skipped",
        report.files_scanned,
        report.files_exported.to_string().bold(),
        report.files_skipped
    );
    println!(
        "   {} rows × {} languages → {}\n",
        report.rows.to_string().bold(),
        report.languages.len(),
        workbook.display()
    );
    if report.files_exported == 0 {
        println!(
            "{}",
            "⚠️  No file matched both the pattern and a requested language".yellow()
        );
    }

    Ok(())
}

/// Execute the import function
pub fn import(workbook: PathBuf, working_directory: PathBuf) -> ConvertResult<()> {
    println!("{}", "📥 propsxls - Import".bold().green());
    println!("   Input:             {}", workbook.display());
    println!("   Working directory: {}\n", working_directory.display());

    let report = converter::import_from_workbook(&workbook, &working_directory)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!(
        "   {} rows read, {} skipped",
        report.rows_read, report.rows_skipped
    );
    println!(
        "   {} properties files written:",
        report.files_written.len().to_string().bold()
    );
    for path in &report.files_written {
        println!("      {}", display_relative(path, &working_directory).cyan());
    }
    println!();

    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
