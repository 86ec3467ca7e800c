use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Format error in {}:{line}: {message}", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    #[error("Invalid file pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl ConvertError {
    /// Attach a path to a raw IO error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors that only concern one source file and can be skipped
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConvertError::Format { .. })
    }
}
