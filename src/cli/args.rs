//! Command-line arguments.
//!
//! Every option is optional at the clap level: which ones are mandatory
//! depends on the function, and a missing one must print the usage help
//! before failing. [`Cli::invocation`] does that validation.

use crate::error::{ConvertError, ConvertResult};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "propsxls")]
#[command(version)]
#[command(about = "Convert per-language .properties files to one Excel workbook and back")]
#[command(long_about = "propsxls - properties ⇄ Excel converter for translators

FUNCTIONS:
  export  - Collect <base>_<lang>.properties files below the working directory
            into one workbook: a row per key, a column per language
  import  - Write <workingDirectory>/<baseName>_<lang>.properties files back
            from the workbook (languages with no values get no file)

EXAMPLES:
  propsxls -f export -xls example.xlsx -wd /tmp/ -langs hu,de -r '.*\\.properties$'
  propsxls -f import -xls example.xlsx -wd /tmp/")]
pub struct Cli {
    /// The function: import or export. Mandatory.
    #[arg(short = 'f', long = "function", env = "PROPSXLS_FUNCTION")]
    pub function: Option<String>,

    /// The Excel file used for the import or export function (e.g. translation.xlsx). Mandatory.
    #[arg(
        short = 'x',
        long = "xlsFileName",
        visible_alias = "xls-file-name",
        env = "PROPSXLS_XLS_FILE"
    )]
    pub xls_file_name: Option<PathBuf>,

    /// Base directory searched recursively for properties files. Mandatory.
    #[arg(
        short = 'w',
        long = "workingDirectory",
        visible_alias = "working-directory",
        env = "PROPSXLS_WORKING_DIRECTORY"
    )]
    pub working_directory: Option<PathBuf>,

    /// Regular expression matched against file names (e.g. .*\.properties$). Mandatory for export.
    #[arg(
        short = 'r',
        long = "fileRegularExpression",
        visible_alias = "file-regular-expression",
        env = "PROPSXLS_FILE_REGEX"
    )]
    pub file_regular_expression: Option<String>,

    /// Comma-separated language codes to process (e.g. hu,de). Mandatory for export.
    #[arg(short = 'l', long = "languages", env = "PROPSXLS_LANGUAGES")]
    pub languages: Option<String>,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// A validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Export {
        workbook: PathBuf,
        working_directory: PathBuf,
        file_pattern: String,
        languages: Vec<String>,
    },
    Import {
        workbook: PathBuf,
        working_directory: PathBuf,
    },
    /// Function value that is neither import nor export
    Unknown(String),
}

impl Cli {
    /// Parse the process arguments, accepting the legacy single-dash flags
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Check mandatory options for the requested function
    pub fn invocation(&self) -> ConvertResult<Invocation> {
        let function = mandatory(self.function.as_ref(), "function")?;
        let workbook = mandatory(self.xls_file_name.as_ref(), "xlsFileName")?.clone();
        let working_directory =
            mandatory(self.working_directory.as_ref(), "workingDirectory")?.clone();

        match function.as_str() {
            "import" => Ok(Invocation::Import {
                workbook,
                working_directory,
            }),
            "export" => {
                let file_pattern =
                    mandatory(self.file_regular_expression.as_ref(), "fileRegularExpression")?
                        .clone();
                let languages = parse_languages(mandatory(self.languages.as_ref(), "languages")?);
                if languages.is_empty() {
                    return Err(ConvertError::Config(
                        "languages must name at least one language code".to_string(),
                    ));
                }
                Ok(Invocation::Export {
                    workbook,
                    working_directory,
                    file_pattern,
                    languages,
                })
            }
            other => Ok(Invocation::Unknown(other.to_string())),
        }
    }
}

fn mandatory<'a, T>(value: Option<&'a T>, name: &str) -> ConvertResult<&'a T> {
    value.ok_or_else(|| ConvertError::Config(format!("Missing mandatory argument: {}", name)))
}

/// Split `hu, de,,en` into `["hu", "de", "en"]`, dropping repeats
pub fn parse_languages(value: &str) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for lang in value.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        if !languages.iter().any(|l| l == lang) {
            languages.push(lang.to_string());
        }
    }
    languages
}

const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("-xls", "--xlsFileName"),
    ("-wd", "--workingDirectory"),
    ("-langs", "--languages"),
];

/// Rewrite `-xls`, `-wd` and `-langs` to their long forms so clap, which
/// only knows single-character short flags, accepts them
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            normalized.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|text| {
            if text == "--" {
                return None;
            }
            LEGACY_FLAGS.iter().find_map(|(legacy, long)| {
                if text == *legacy {
                    Some(OsString::from(*long))
                } else {
                    text.strip_prefix(*legacy)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| OsString::from(format!("{}={}", long, value)))
                }
            })
        });
        if arg == "--" {
            passthrough = true;
        }
        normalized.push(rewritten.unwrap_or(arg));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(os(args))).unwrap()
    }

    #[test]
    fn test_normalize_legacy_flags() {
        assert_eq!(
            normalize_args(os(&["propsxls", "-xls", "a.xlsx", "-wd", "/tmp", "-langs", "hu"])),
            os(&[
                "propsxls",
                "--xlsFileName",
                "a.xlsx",
                "--workingDirectory",
                "/tmp",
                "--languages",
                "hu"
            ])
        );
    }

    #[test]
    fn test_normalize_legacy_flags_with_equals() {
        assert_eq!(
            normalize_args(os(&["propsxls", "-langs=hu,de"])),
            os(&["propsxls", "--languages=hu,de"])
        );
    }

    #[test]
    fn test_normalize_stops_at_double_dash() {
        assert_eq!(
            normalize_args(os(&["propsxls", "--", "-wd"])),
            os(&["propsxls", "--", "-wd"])
        );
    }

    #[test]
    fn test_export_invocation() {
        let cli = parse(&[
            "propsxls", "-f", "export", "-xls", "t.xlsx", "-wd", "/src", "-r", r".*\.properties$",
            "-langs", "hu, de",
        ]);
        assert_eq!(
            cli.invocation().unwrap(),
            Invocation::Export {
                workbook: PathBuf::from("t.xlsx"),
                working_directory: PathBuf::from("/src"),
                file_pattern: r".*\.properties$".to_string(),
                languages: vec!["hu".to_string(), "de".to_string()],
            }
        );
    }

    #[test]
    fn test_import_invocation_with_long_flags() {
        let cli = parse(&[
            "propsxls",
            "--function",
            "import",
            "--xlsFileName",
            "t.xlsx",
            "--workingDirectory",
            "/out",
        ]);
        assert_eq!(
            cli.invocation().unwrap(),
            Invocation::Import {
                workbook: PathBuf::from("t.xlsx"),
                working_directory: PathBuf::from("/out"),
            }
        );
    }

    #[test]
    fn test_missing_mandatory_argument() {
        let cli = parse(&["propsxls", "-f", "import", "-xls", "t.xlsx"]);
        match cli.invocation() {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("workingDirectory")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_export_requires_pattern_and_languages() {
        let cli = parse(&["propsxls", "-f", "export", "-xls", "t.xlsx", "-wd", "/src"]);
        assert!(matches!(cli.invocation(), Err(ConvertError::Config(_))));

        let cli = parse(&[
            "propsxls", "-f", "export", "-xls", "t.xlsx", "-wd", "/src", "-r", ".*", "-langs",
            " , ",
        ]);
        assert!(matches!(cli.invocation(), Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_unknown_function() {
        let cli = parse(&["propsxls", "-f", "merge", "-xls", "t.xlsx", "-wd", "/src"]);
        assert_eq!(
            cli.invocation().unwrap(),
            Invocation::Unknown("merge".to_string())
        );
    }

    #[test]
    fn test_parse_languages() {
        assert_eq!(parse_languages("hu, de,,en,hu"), vec!["hu", "de", "en"]);
        assert!(parse_languages("").is_empty());
    }
}
