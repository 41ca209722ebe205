//! GridError - the crate-level error

use super::ConfigError;
use super::DatasetError;
use super::PathError;
use super::SessionError;

/// Top-level error for the table engine.
///
/// Only construction, ingestion and configuration can fail. Paging, sorting,
/// selecting and searching degrade gracefully instead of returning errors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result alias for fallible engine construction.
pub type Result<T> = std::result::Result<T, GridError>;
