//! Common error types for the course cabinet

use thiserror::Error;

/// Common result type for cabinet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across cabinet crates
///
/// Parsing and normalization never produce an error. Only acquisition,
/// lesson lookup, configuration and storage writes can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// No CSV location configured (empty sheet URL or sample path)
    #[error("CSV source is missing. Update the config file")]
    SourceUnavailable,

    /// CSV fetch returned a non-success status or could not be completed
    #[error("Could not load lessons ({0}). Check your CSV URL/public access")]
    FetchFailed(String),

    /// Requested lesson id has no record in the catalog
    #[error("Lesson not found for this course: {0}")]
    LessonNotFound(String),

    /// Lesson exists but its day is above the unlock threshold
    #[error("Lesson {lesson_id} (day {day_number}) is not yet accessible; lessons up to day {unlock_threshold} are open")]
    LessonLocked {
        lesson_id: String,
        day_number: u32,
        unlock_threshold: u32,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store write failure
    #[error("Storage error: {0}")]
    Storage(String),
}
