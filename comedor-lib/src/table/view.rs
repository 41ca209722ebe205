//! Presentation snapshot produced by [`DataTable::view`](super::DataTable::view).
//!
//! The view is plain data: a renderer walks it without touching the engine.

use super::Cell;
use crate::config::PageSize;
use crate::model::RowId;
use crate::sort::SortIndicator;

/// What the table currently shows. Loading wins over empty, and both
/// replace the grid entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Loading(LoadingView),
    Empty(EmptyView),
    Grid(GridView),
}

impl TableView {
    pub fn is_loading(&self) -> bool {
        matches!(self, TableView::Loading(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty(_))
    }

    /// The grid, if one is shown.
    pub fn grid(&self) -> Option<&GridView> {
        match self {
            TableView::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

/// Skeleton placeholder: `rows` rows of `columns` blank cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingView {
    pub columns: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub message: String,
}

/// Header, visible page of rows and optional pagination bar.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// Select-all checkbox state; `None` when the table is not selectable.
    pub select_all: Option<bool>,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RowView>,
    /// Present only when pagination is enabled and there is more than one page.
    pub pagination: Option<PaginationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub title: String,
    pub width: Option<usize>,
    pub class: Option<String>,
    /// Sort indicator; `None` when the column cannot be sorted.
    pub sort: Option<SortIndicator>,
}

impl HeaderCell {
    pub fn is_sortable(&self) -> bool {
        self.sort.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    /// Checkbox state; `None` when the table is not selectable.
    pub selected: Option<bool>,
    /// A row-click callback is registered.
    pub clickable: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    /// 1-based position of the first row on the page.
    pub first_item: usize,
    /// 1-based position of the last row on the page.
    pub last_item: usize,
    /// Page-number buttons.
    pub pages: Vec<usize>,
    /// Page-size selector options.
    pub page_sizes: &'static [PageSize],
    pub has_prev: bool,
    pub has_next: bool,
}
