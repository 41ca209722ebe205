//! Column descriptors and cell rendering.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::model::FieldPath;
use crate::model::Row;
use crate::model::Value;
use crate::sort::Comparator;

/// Rendered content of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Text to display.
    pub text: String,
    /// Optional style class (e.g. `"badge-success"`).
    pub class: Option<String>,
}

impl Cell {
    /// A plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the style class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Custom cell renderer: `(resolved value, row) -> cell`. Must not mutate
/// the row.
pub type RenderFn<R> = Arc<dyn Fn(Option<&Value>, &R) -> Cell + Send + Sync>;

/// How a column turns a row into a cell.
pub enum CellRenderer<R> {
    /// Display the resolved value as text.
    Value,
    /// Delegate to a custom renderer.
    Custom(RenderFn<R>),
}

impl<R> Clone for CellRenderer<R> {
    fn clone(&self) -> Self {
        match self {
            CellRenderer::Value => CellRenderer::Value,
            CellRenderer::Custom(f) => CellRenderer::Custom(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for CellRenderer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRenderer::Value => f.write_str("Value"),
            CellRenderer::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use comedor_lib::model::Record;
/// use comedor_lib::table::{Cell, Column};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name"),
///     Column::new("guardian.phone", "Phone").sortable(false).width("14"),
///     Column::new("active", "Status").render(|value, _row: &Record| {
///         match value.map(|v| v.is_truthy()) {
///             Some(true) => Cell::text("Active").with_class("badge-success"),
///             _ => Cell::text("Inactive").with_class("badge-muted"),
///         }
///     }),
/// ];
/// ```
pub struct Column<R> {
    /// Dotted path of the displayed field; also the sort key.
    pub key: FieldPath,
    /// Header text.
    pub title: String,
    /// Whether header clicks sort this column. Default: true.
    pub sortable: bool,
    /// Width hint, e.g. `"12"` characters.
    pub width: Option<String>,
    /// Style class applied to the header and every cell.
    pub class: Option<String>,
    renderer: CellRenderer<R>,
    comparator: Option<Comparator>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            width: self.width.clone(),
            class: self.class.clone(),
            renderer: self.renderer.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("renderer", &self.renderer)
            .field("comparator", &self.comparator.is_some())
            .finish()
    }
}

impl<R> Column<R> {
    /// Create a sortable column displaying the value at `key`.
    pub fn new(key: impl Into<FieldPath>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: true,
            width: None,
            class: None,
            renderer: CellRenderer::Value,
            comparator: None,
        }
    }

    /// Enable or disable sorting on this column.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Set the style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Use a custom cell renderer.
    pub fn render(
        mut self,
        render: impl Fn(Option<&Value>, &R) -> Cell + Send + Sync + 'static,
    ) -> Self {
        self.renderer = CellRenderer::Custom(Arc::new(render));
        self
    }

    /// Order this column's values with a custom comparator.
    pub fn compare_with(
        mut self,
        compare: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// The renderer strategy.
    pub fn renderer(&self) -> &CellRenderer<R> {
        &self.renderer
    }

    /// The custom comparator, if any.
    pub fn comparator(&self) -> Option<&Comparator> {
        self.comparator.as_ref()
    }

    /// Width hint in characters, when it starts with a number.
    pub fn width_chars(&self) -> Option<usize> {
        let width = self.width.as_deref()?;
        let digits: String = width.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}

impl<R: Row> Column<R> {
    /// Render the cell for `row`.
    pub fn render_cell(&self, row: &R) -> Cell {
        let value = row.field(&self.key);
        let mut cell = match &self.renderer {
            CellRenderer::Value => value
                .map(|v| Cell::text(v.display_text()))
                .unwrap_or_default(),
            CellRenderer::Custom(render) => render(value.as_ref(), row),
        };
        if cell.class.is_none() {
            cell.class = self.class.clone();
        }
        cell
    }
}
