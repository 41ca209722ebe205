//! Table render surface.
//!
//! [`DataTable`] composes the engines into one stateful grid:
//! rows → search and filters → sort → pagination → [`TableView`].
//! Every stage except the search debounce is recomputed from the source
//! rows, so replacing data re-runs the whole pipeline.

mod column;
mod view;

pub use column::{Cell, CellRenderer, Column, RenderFn};
pub use view::{EmptyView, GridView, HeaderCell, LoadingView, PaginationView, RowView, TableView};

use std::fmt;
use std::sync::Arc;

use crate::config::{PageSize, SearchConfig, TableConfig};
use crate::error::{ConfigError, DatasetError};
use crate::model::{Dataset, Row, RowId};
use crate::pagination::Pagination;
use crate::schedule::{Clock, SystemClock};
use crate::search::{FilterDef, FilterSet, FilterValue, Search};
use crate::selection::Selection;
use crate::sort::{self, SortState};

/// Called with the clicked row.
pub type RowClickCallback<R> = Box<dyn FnMut(&R) + Send>;

/// Called with the new page size.
pub type PageSizeCallback = Box<dyn FnMut(usize) + Send>;

/// Sortable, paginated, selectable data grid.
///
/// # Examples
///
/// ```
/// use comedor_lib::config::TableConfig;
/// use comedor_lib::model::Record;
/// use comedor_lib::table::{Column, DataTable};
///
/// let rows = vec![
///     Record::new().set("id", 1).set("name", "Mariana"),
///     Record::new().set("id", 2).set("name", "Carlos"),
///     Record::new().set("id", 3).set("name", "Ana"),
/// ];
/// let mut table = DataTable::new(vec![Column::new("name", "Name")], TableConfig::default())
///     .unwrap()
///     .with_rows(rows)
///     .unwrap();
///
/// table.click_header(0);
/// let names: Vec<_> = table
///     .page_rows()
///     .iter()
///     .map(|row| row.get("name").unwrap().display_text())
///     .collect();
/// assert_eq!(names, ["Ana", "Carlos", "Mariana"]);
/// ```
pub struct DataTable<R> {
    dataset: Dataset<R>,
    columns: Vec<Column<R>>,
    config: TableConfig,
    loading: bool,
    sort: SortState,
    pagination: Pagination,
    selection: Selection,
    search: Option<Search>,
    filters: Option<FilterSet>,
    clock: Arc<dyn Clock>,
    /// Dataset positions after filtering and sorting.
    order: Vec<usize>,
    on_row_click: Option<RowClickCallback<R>>,
    on_page_size_change: Option<PageSizeCallback>,
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.dataset.len())
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("loading", &self.loading)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("visible", &self.order.len())
            .finish()
    }
}

impl<R: Row> DataTable<R> {
    /// Creates an empty table. Fails if the configured page size is zero.
    pub fn new(columns: Vec<Column<R>>, config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            dataset: Dataset::default(),
            columns,
            pagination: Pagination::new(config.page_size),
            config,
            loading: false,
            sort: SortState::none(),
            selection: Selection::new(),
            search: None,
            filters: None,
            clock: Arc::new(SystemClock),
            order: Vec::new(),
            on_row_click: None,
            on_page_size_change: None,
        })
    }

    /// Loads the initial rows.
    pub fn with_rows(mut self, rows: Vec<R>) -> Result<Self, DatasetError> {
        self.set_rows(rows)?;
        Ok(self)
    }

    /// Uses `clock` for the search debounce.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Adds a search box over the configured fields.
    pub fn with_search(mut self, config: SearchConfig) -> Self {
        self.search = Some(Search::new(config));
        self
    }

    /// Adds an advanced filter panel.
    pub fn with_filters(mut self, defs: Vec<FilterDef>) -> Self {
        self.filters = Some(FilterSet::new(defs));
        self.refresh();
        self
    }

    // Callbacks

    pub fn on_row_click(&mut self, callback: impl FnMut(&R) + Send + 'static) {
        self.on_row_click = Some(Box::new(callback));
    }

    /// Fires with the full selected-id list on every selection change.
    pub fn on_row_select(&mut self, callback: impl FnMut(&[RowId]) + Send + 'static) {
        self.selection.on_change(callback);
    }

    pub fn on_page_size_change(&mut self, callback: impl FnMut(usize) + Send + 'static) {
        self.on_page_size_change = Some(Box::new(callback));
    }

    /// Fires with the raw term on every input change, blank included.
    /// Ignored when the table has no search box.
    pub fn on_search(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        match self.search.as_mut() {
            Some(search) => search.on_search(callback),
            None => log::warn!("DataTable: on_search without a search box"),
        }
    }

    /// Fires when a debounced term takes effect, or with `""` when the
    /// applied term is cleared. Ignored when the table has no search box.
    pub fn on_apply(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        match self.search.as_mut() {
            Some(search) => search.on_apply(callback),
            None => log::warn!("DataTable: on_apply without a search box"),
        }
    }

    // Data

    /// Replaces the rows. Selected ids no longer present are dropped and
    /// the current page is clamped to the new page count.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), DatasetError> {
        self.set_dataset(Dataset::new(rows)?);
        Ok(())
    }

    pub fn set_dataset(&mut self, dataset: Dataset<R>) {
        self.dataset = dataset;
        let removed = self.selection.retain(|id| self.dataset.contains(id));
        if !removed.is_empty() {
            log::debug!("DataTable: pruned {} stale selections", removed.len());
        }
        self.refresh();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    // Sorting

    /// Handles a click on the header of column `index`. Sorts only when
    /// both the table and the column are sortable. Returns `true` if the
    /// sort changed.
    pub fn click_header(&mut self, index: usize) -> bool {
        let Some(column) = self.columns.get(index) else {
            return false;
        };
        if !self.config.sortable || !column.sortable {
            return false;
        }
        let key = column.key.clone();
        self.sort.toggle(key);
        log::debug!("DataTable: sort {:?}", self.sort);
        self.refresh();
        true
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.refresh();
    }

    // Selection

    /// Handles a click on the row at `position` of the current page.
    /// Returns `true` if a row-click callback ran.
    pub fn click_row(&mut self, position: usize) -> bool {
        let Some(&index) = self.page_indices().get(position) else {
            return false;
        };
        match (self.on_row_click.as_mut(), self.dataset.get(index)) {
            (Some(callback), Some(row)) => {
                callback(row);
                true
            }
            _ => false,
        }
    }

    /// Toggles one row's checkbox. No-op unless the table is selectable.
    pub fn toggle_row(&mut self, id: &RowId) -> bool {
        if !self.config.selectable || !self.dataset.contains(id) {
            return false;
        }
        self.selection.toggle(id);
        true
    }

    /// Sets one row's checkbox. Returns `true` if the selection changed.
    pub fn set_row_selected(&mut self, id: &RowId, selected: bool) -> bool {
        if !self.config.selectable || !self.dataset.contains(id) {
            return false;
        }
        self.selection.set(id, selected)
    }

    /// Handles the select-all checkbox: checking selects exactly the rows
    /// on the current page, unchecking clears the whole selection.
    pub fn toggle_select_all(&mut self, checked: bool) -> bool {
        if !self.config.selectable {
            return false;
        }
        if checked {
            let ids = self.page_ids();
            self.selection.select_all(&ids)
        } else {
            !self.selection.clear().is_empty()
        }
    }

    // Pagination

    pub fn go_to_page(&mut self, page: i64) -> usize {
        self.pagination.go_to_page(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.pagination.next_page()
    }

    pub fn prev_page(&mut self) -> usize {
        self.pagination.prev_page()
    }

    pub fn first_page(&mut self) -> usize {
        self.pagination.first_page()
    }

    pub fn last_page(&mut self) -> usize {
        self.pagination.last_page()
    }

    /// Changes the page size from the selector and keeps the current page
    /// in range.
    pub fn set_page_size(&mut self, size: PageSize) {
        let size = size.get();
        if size == self.pagination.page_size() {
            return;
        }
        self.pagination.set_page_size(size);
        self.pagination.clamp();
        if let Some(callback) = self.on_page_size_change.as_mut() {
            callback(size);
        }
    }

    // Search and filters

    /// Updates the search term. Blank terms clear the filter immediately;
    /// others apply on a later [`tick`](Self::tick).
    pub fn set_search_term(&mut self, term: &str) -> bool {
        let now = self.clock.now();
        let Some(search) = self.search.as_mut() else {
            return false;
        };
        let changed = search.set_term(term, now);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Applies a pending search term whose debounce window has elapsed.
    /// Returns `true` if the visible rows were recomputed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let applied = self.search.as_mut().is_some_and(|search| search.poll(now));
        if applied {
            self.refresh();
        }
        applied
    }

    /// Sets an advanced filter. Returns `false` without filters or for an
    /// unknown name.
    pub fn set_filter(&mut self, name: &str, value: FilterValue) -> bool {
        let changed = self
            .filters
            .as_mut()
            .is_some_and(|filters| filters.set(name, value));
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn reset_filters(&mut self) {
        if let Some(filters) = self.filters.as_mut() {
            filters.reset();
            self.refresh();
        }
    }

    // Accessors

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn dataset(&self) -> &Dataset<R> {
        &self.dataset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection.selected_ids()
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn filters(&self) -> Option<&FilterSet> {
        self.filters.as_ref()
    }

    /// `true` while a typed search term waits out its debounce.
    pub fn is_searching(&self) -> bool {
        self.search.as_ref().is_some_and(Search::is_searching)
    }

    /// Number of rows passing search and filters.
    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    /// Rows passing search and filters, in display order.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.order
            .iter()
            .filter_map(|&i| self.dataset.get(i))
            .collect()
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices()
            .iter()
            .filter_map(|&i| self.dataset.get(i))
            .collect()
    }

    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<RowId> {
        self.page_indices()
            .iter()
            .filter_map(|&i| self.dataset.id_at(i).cloned())
            .collect()
    }

    // View

    /// Snapshot of what the table shows now.
    pub fn view(&self) -> TableView {
        let selectable = self.config.selectable;

        if self.loading {
            return TableView::Loading(LoadingView {
                columns: self.columns.len() + usize::from(selectable),
                rows: self.config.skeleton_rows,
            });
        }

        if self.order.is_empty() {
            return TableView::Empty(EmptyView {
                message: self.config.empty_message.clone(),
            });
        }

        let header = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                title: column.title.clone(),
                width: column.width_chars(),
                class: column.class.clone(),
                sort: (self.config.sortable && column.sortable)
                    .then(|| self.sort.indicator(&column.key)),
            })
            .collect();

        let clickable = self.on_row_click.is_some();
        let rows = self
            .page_indices()
            .iter()
            .filter_map(|&i| Some((self.dataset.id_at(i)?, self.dataset.get(i)?)))
            .map(|(id, row)| RowView {
                id: id.clone(),
                selected: selectable.then(|| self.selection.is_selected(id)),
                clickable,
                cells: self.columns.iter().map(|c| c.render_cell(row)).collect(),
            })
            .collect();

        let select_all = selectable.then(|| self.selection.all_selected(&self.page_ids()));

        GridView {
            select_all,
            header,
            rows,
            pagination: self.pagination_view(),
        }
        .into()
    }

    fn pagination_view(&self) -> Option<PaginationView> {
        let pagination = &self.pagination;
        if !self.config.show_pagination || pagination.total_pages() <= 1 {
            return None;
        }
        let (first_item, last_item) = pagination.item_range()?;
        Some(PaginationView {
            current_page: pagination.current_page(),
            total_pages: pagination.total_pages(),
            total_items: pagination.total_items(),
            page_size: pagination.page_size(),
            first_item,
            last_item,
            pages: pagination.page_window(self.config.page_window),
            page_sizes: &PageSize::ALL,
            has_prev: pagination.has_prev_page(),
            has_next: pagination.has_next_page(),
        })
    }

    fn page_indices(&self) -> &[usize] {
        self.pagination.paginate(&self.order)
    }

    /// Re-runs filter and sort, then keeps the page in range.
    fn refresh(&mut self) {
        let rows = self.dataset.rows();
        let candidates = match &self.search {
            Some(search) => search.filter_indices(rows),
            None => (0..rows.len()).collect(),
        };
        let filtered: Vec<usize> = match &self.filters {
            Some(filters) => candidates
                .into_iter()
                .filter(|&i| filters.matches(&rows[i]))
                .collect(),
            None => candidates,
        };

        let comparator = self.sort.key().and_then(|key| {
            self.columns
                .iter()
                .find(|column| &column.key == key)
                .and_then(Column::comparator)
        });
        self.order = sort::sort_indices(rows, filtered, &self.sort, comparator);

        self.pagination.set_total_items(self.order.len());
        self.pagination.clamp();
        log::trace!(
            "DataTable: {} of {} rows visible",
            self.order.len(),
            self.dataset.len()
        );
    }
}

impl From<GridView> for TableView {
    fn from(grid: GridView) -> Self {
        TableView::Grid(grid)
    }
}
