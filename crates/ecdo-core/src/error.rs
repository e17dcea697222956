use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of [`EcdoError`] variants.
///
/// Callers that only care about *why* a load failed (missing file, empty
/// discovery, malformed content) can match on this instead of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A path is missing or unreadable.
    FileAccess,
    /// Discovery or year filtering produced an empty file set.
    NotFound,
    /// File content (or a file name) could not be parsed.
    Parse,
    /// A configuration value is missing or invalid.
    Config,
}

/// All errors produced by the ingestion pipeline.
#[derive(Error, Debug)]
pub enum EcdoError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No AAM files matched the naming pattern in the given directory.
    #[error("No AAM files found in {0}")]
    NoDataFiles(PathBuf),

    /// AAM files exist, but none fall inside the requested year range.
    #[error("No AAM files found in {dir} for year range {}-{}", fmt_year(.start_year), fmt_year(.end_year))]
    NoFilesInYearRange {
        dir: PathBuf,
        start_year: Option<i32>,
        end_year: Option<i32>,
    },

    /// A data line is malformed (field count, number or date).
    #[error("Parse error in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A delimited file lacks a column the loader requires.
    #[error("Missing required column `{column}` in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A file name does not carry a parseable year token.
    #[error("Cannot extract year from file name: {0}")]
    FileName(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON configuration document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl EcdoError {
    /// Classify this error into the loader taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcdoError::FileAccess { .. } => ErrorKind::FileAccess,
            EcdoError::NoDataFiles(_) | EcdoError::NoFilesInYearRange { .. } => {
                ErrorKind::NotFound
            }
            EcdoError::Parse { .. } | EcdoError::MissingColumn { .. } | EcdoError::FileName(_) => {
                ErrorKind::Parse
            }
            EcdoError::Config(_) | EcdoError::JsonParse(_) => ErrorKind::Config,
        }
    }
}

fn fmt_year(year: &Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "*".to_string())
}

/// Convenience alias used throughout the ecdo crates.
pub type Result<T> = std::result::Result<T, EcdoError>;
