//! DatasetError for row ingestion

use crate::model::RowId;

/// Error type for ingesting rows into a [`Dataset`](crate::model::Dataset).
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The JSON document is not an array.
    #[error("Expected a JSON array of records, got {actual}")]
    NotAnArray { actual: &'static str },

    /// An element of the array is not an object.
    #[error("Row {index} is not a JSON object (got {actual})")]
    NotAnObject { index: usize, actual: &'static str },

    /// Two rows carry the same identifier.
    #[error("Duplicate row id '{id}'")]
    DuplicateId { id: RowId },

    /// The JSON document could not be parsed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
