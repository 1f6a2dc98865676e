//! Error types for bulkedit core.

use thiserror::Error;

use bulkedit_engine::engine::ValidationError;

/// Errors that can occur while loading sheets or applying bulk edits
#[derive(Error, Debug)]
pub enum BulkEditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV file is empty")]
    EmptyCsv,

    #[error("No file path set")]
    NoFilePath,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Row {row} is out of range (sheet has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Nothing selected")]
    EmptySelection,

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, BulkEditError>;
