//! CliError

use std::path::PathBuf;

use comedor_lib::error::GridError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid column '{0}', expected KEY or KEY:TITLE")]
    InvalidColumn(String),

    #[error("The data has no columns to show")]
    NoColumns,

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
