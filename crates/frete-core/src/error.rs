use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the freight dashboard crates.
#[derive(Error, Debug)]
pub enum FreteError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file extension is not one of the supported table formats.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A spreadsheet workbook could not be opened or its sheet read.
    #[error("Failed to parse workbook {path}: {message}")]
    WorkbookParse { path: PathBuf, message: String },

    /// The table has no header row at all.
    #[error("No header row found in {0}")]
    MissingHeader(PathBuf),

    /// One or more columns needed by the pipeline are absent.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error while writing the saved configuration.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the freight crates.
pub type Result<T> = std::result::Result<T, FreteError>;
