//! ConfigError for table and search configuration

/// Error type for invalid table or search configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Page size must be at least one row.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// The page size is not one of the selector options.
    #[error("Page size {0} is not one of the selectable sizes (5, 10, 25, 50)")]
    UnsupportedPageSize(usize),

    /// The configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
