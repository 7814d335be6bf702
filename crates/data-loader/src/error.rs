//! Error types for the data-loader crate.
//!
//! Two families live here:
//! - `DataLoadError` for storage and ingestion failures, which abort a run
//! - `GenreParseError` for a single malformed genre field, which callers
//!   log and skip

use thiserror::Error;

/// Errors that can occur while ingesting, normalizing or reading the store.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The ingestion CSV could not be decoded
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Any failure reported by SQLite, including malformed schema scripts
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// An external schema script is missing
    #[error("SQL script not found: {path}")]
    ScriptNotFound { path: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Why a serialized genre list could not be turned into genre names.
#[derive(Error, Debug)]
pub enum GenreParseError {
    /// The field is not valid JSON at all
    #[error("malformed genre list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Valid JSON, but the top-level value is not a list
    #[error("expected a list of genre records, found {found}")]
    NotAList { found: &'static str },

    /// A list element or its `name` field has the wrong type
    #[error("unexpected {found} at position {position} of the genre list")]
    WrongType {
        position: usize,
        found: &'static str,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
