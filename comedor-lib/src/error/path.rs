//! PathError for dotted field paths

/// Error type for parsing a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("Field path is empty")]
    Empty,

    /// One of the dot-separated segments was empty (e.g. `"a..b"`).
    #[error("Field path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

impl PathError {
    /// Creates a new empty segment error.
    pub fn empty_segment(path: impl Into<String>, position: usize) -> Self {
        Self::EmptySegment {
            path: path.into(),
            position,
        }
    }
}
