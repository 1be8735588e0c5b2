//! Error types for building paged tables.
//!
//! Only construction can fail. Everything that happens after a table exists
//! (fitting, resizing, navigation) degrades gracefully instead of erroring.

/// Errors raised while reading a table's source payload.
#[derive(Debug, thiserror::Error)]
pub enum PagedTableError {
    /// No source payload was supplied for the table.
    #[error("a single pagedtable source was not found (none supplied)")]
    MissingSource,

    /// More than one source payload was supplied for the table.
    #[error("a single pagedtable source was not found ({0} supplied)")]
    DuplicateSource(usize),

    /// The payload is not valid JSON.
    #[error("payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is JSON but does not have the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PagedTableError>;
