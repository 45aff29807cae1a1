//! Error types for calendar encoding and showtime discovery.

use thiserror::Error;

/// Errors that can occur while building a calendar or producing its records.
#[derive(Error, Debug)]
pub enum IcsError {
    #[error("UID generation failed: {0}")]
    UidGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid event '{summary}': {reason}")]
    InvalidRecord { summary: String, reason: String },

    #[error("Could not parse showtime: {0}")]
    ShowtimeParse(String),

    #[error("Listing error: {0}")]
    Listing(String),
}

/// Result type alias for calendar operations.
pub type IcsResult<T> = Result<T, IcsError>;
