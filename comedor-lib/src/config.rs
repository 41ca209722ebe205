//! Table and search configuration.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::model::FieldPath;

/// Page sizes offered by the page-size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageSize {
    Five,
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    /// Every selector option, smallest first.
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
    ];

    /// Rows per page.
    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(ConfigError::UnsupportedPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per page", self.get())
    }
}

/// Configuration for a [`DataTable`](crate::table::DataTable).
///
/// # Example
///
/// ```
/// use comedor_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_selectable(true)
///     .with_page_size(25)
///     .with_empty_message("No students enrolled");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Header clicks toggle sorting.
    ///
    /// Default: true
    pub sortable: bool,

    /// Rows carry selection checkboxes.
    ///
    /// Default: false
    pub selectable: bool,

    /// Initial rows per page. Any positive value; the selector itself
    /// offers [`PageSize::ALL`].
    ///
    /// Default: 10
    pub page_size: usize,

    /// Show pagination controls (only drawn when there is more than one page).
    ///
    /// Default: true
    pub show_pagination: bool,

    /// Message shown instead of the grid when there are no rows.
    pub empty_message: String,

    /// Placeholder rows drawn while loading.
    ///
    /// Default: 5
    pub skeleton_rows: usize,

    /// Page-number buttons in the pagination bar.
    ///
    /// Default: 5
    pub page_window: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sortable: true,
            selectable: false,
            page_size: 10,
            show_pagination: true,
            empty_message: "No data to display".to_string(),
            skeleton_rows: 5,
            page_window: 5,
        }
    }
}

impl TableConfig {
    /// Creates a table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration. Missing keys take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that the type does not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    /// Enables or disables sorting.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables or disables row selection.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Shows or hides pagination controls.
    pub fn with_show_pagination(mut self, show: bool) -> Self {
        self.show_pagination = show;
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the number of loading placeholder rows.
    pub fn with_skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    /// Sets the number of page buttons.
    pub fn with_page_window(mut self, width: usize) -> Self {
        self.page_window = width;
        self
    }
}

/// Configuration for a [`Search`](crate::search::Search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Dotted paths searched for the term.
    pub fields: Vec<FieldPath>,

    /// Quiet period before a typed term is applied.
    ///
    /// Default: 300 ms
    #[serde(rename = "debounce_ms", with = "duration_ms")]
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            debounce: Duration::from_millis(300),
        }
    }
}

impl SearchConfig {
    /// Creates a search config over the given fields.
    pub fn new<P: Into<FieldPath>>(fields: impl IntoIterator<Item = P>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration. Field paths are validated strictly.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
