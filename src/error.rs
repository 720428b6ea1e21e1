//! Error types for loading and analysing a passenger file.
//!
//! Only fatal conditions live here. Degenerate inputs (empty columns, zero
//! variance, an empty dataset) are reported per cell as `None` or a flag on
//! the result and never abort a run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdaError {
    /// The input file could not be opened or read.
    #[error("Failed to read '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// The CSV stream itself is malformed.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns are absent from the header.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A required value is empty on a given data row (1-based).
    #[error("Row {row}: required field '{column}' is empty")]
    Schema { row: usize, column: &'static str },

    /// A value is present but cannot be interpreted for its column.
    #[error("Row {row}: invalid value '{value}' for '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Writing a report file failed.
    #[error("Failed to write '{path}': {reason}")]
    Export { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EdaError {
    /// Short machine-readable code, printed alongside the message.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } | Self::Csv(_) | Self::Io(_) => "LOAD_ERROR",
            Self::MissingColumns(_) | Self::Schema { .. } => "SCHEMA_ERROR",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::Export { .. } | Self::Json(_) => "EXPORT_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, EdaError>;
