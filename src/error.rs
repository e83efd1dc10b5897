use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// Any of these means nothing was produced: ingestion is all-or-nothing, so a caller holding a
/// [`crate::collection::RecordSet`] keeps its previous records.
///
/// Malformed numeric cells are never reported here; they coerce to zero (see
/// [`crate::coercion::to_non_negative_int`]).
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is not a tabular row sequence (no header, no report column, unknown format...).
    #[error("not tabular: {message}")]
    NotTabular { message: String },

    /// A persisted record snapshot could not be decoded.
    #[error("invalid snapshot: {message}")]
    Snapshot { message: String },
}

/// Errors raised by record-level edits on an owned collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A driver record needs a non-blank name.
    #[error("driver name must not be empty")]
    EmptyDriverName,

    /// The addressed record does not exist.
    #[error("record index {index} out of range (len={len})")]
    IndexOutOfRange { index: usize, len: usize },
}
