//! Dotted field paths (`"address.city"`).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::PathError;

/// A dotted path addressing a possibly nested field of a row.
///
/// [`FieldPath::parse`] is strict and rejects empty segments; it is what
/// configuration and deserialization go through. The `From<&str>` conversion
/// used when building columns in code is lenient: a malformed path simply
/// never resolves, so the cell renders empty and the row never matches a
/// search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path, rejecting empty paths and empty segments.
    ///
    /// # Example
    ///
    /// ```
    /// use comedor_lib::model::FieldPath;
    ///
    /// let path = FieldPath::parse("contact.email").unwrap();
    /// assert_eq!(path.segments(), ["contact", "email"]);
    /// assert!(FieldPath::parse("contact..email").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(position) = path.split('.').position(str::is_empty) {
            return Err(PathError::empty_segment(path, position));
        }
        Ok(Self::split(path))
    }

    fn split(path: &str) -> Self {
        Self {
            raw: path.to_string(),
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the individual segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the first segment (the top-level field name).
    pub fn head(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }

    /// Returns the segments after the first one.
    pub fn tail(&self) -> &[String] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// Returns `true` if the path has a single segment.
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::split(path)
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(path: &FieldPath) -> Self {
        path.clone()
    }
}
