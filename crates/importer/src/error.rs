use std::path::PathBuf;

use thiserror::Error;

use crate::results::models::RowError;

pub type Result<T> = std::result::Result<T, ImporterError>;

/// Failures that abort a whole import. Problems with individual CSV rows are
/// reported as [`RowError`]s instead.
#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Event {0} not found")]
    EventNotFound(i64),

    #[error("Event '{name}' ({date}) has not started yet; results are accepted from the event day on")]
    EventNotConcluded { name: String, date: String },

    #[error("Event {event_id} has an invalid date: '{date}'")]
    InvalidEventDate { event_id: i64, date: String },

    #[error("No valid results found in the file ({} rows rejected)", .0.len())]
    NoValidResults(Vec<RowError>),

    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),
}
