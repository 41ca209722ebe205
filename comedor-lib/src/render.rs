//! Plain-text rendering of a [`TableView`].
//!
//! Widths are measured in terminal columns, so accented names and
//! double-width glyphs line up.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::table::{GridView, HeaderCell, PaginationView, TableView};

/// Widest a column grows when it has no width hint.
pub const MAX_COLUMN_WIDTH: usize = 40;

const SEPARATOR: &str = " │ ";
const SKELETON_WIDTH: usize = 8;

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cuts `s` to `max_width` columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Truncates or right-pads `s` to exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&out));
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Renders the view as lines of text, without a trailing newline.
pub fn render_text(view: &TableView) -> String {
    match view {
        TableView::Loading(loading) => {
            let cell = "░".repeat(SKELETON_WIDTH);
            let line = vec![cell.as_str(); loading.columns.max(1)].join(SEPARATOR);
            vec![line; loading.rows].join("\n")
        }
        TableView::Empty(empty) => format!("📋 {}", empty.message),
        TableView::Grid(grid) => render_grid(grid),
    }
}

fn header_label(cell: &HeaderCell) -> String {
    match cell.sort {
        Some(indicator) => format!("{} {}", cell.title, indicator),
        None => cell.title.clone(),
    }
}

fn column_widths(grid: &GridView) -> Vec<usize> {
    grid.header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if let Some(width) = cell.width {
                return width;
            }
            let content = grid
                .rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|c| display_width(&c.text))
                .max()
                .unwrap_or(0);
            content
                .max(display_width(&header_label(cell)))
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn render_grid(grid: &GridView) -> String {
    let widths = column_widths(grid);
    let mut lines = Vec::with_capacity(grid.rows.len() + 4);

    let mut header: Vec<String> = Vec::new();
    if let Some(all) = grid.select_all {
        header.push(checkbox(all).to_string());
    }
    header.extend(
        grid.header
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| fit_to_width(&header_label(cell), width)),
    );
    lines.push(header.join(SEPARATOR).trim_end().to_string());

    let mut rule: Vec<String> = Vec::new();
    if grid.select_all.is_some() {
        rule.push("─".repeat(3));
    }
    rule.extend(widths.iter().map(|&w| "─".repeat(w)));
    lines.push(rule.join("─┼─"));

    for row in &grid.rows {
        let mut cells: Vec<String> = Vec::new();
        if let Some(selected) = row.selected {
            cells.push(checkbox(selected).to_string());
        }
        cells.extend(
            widths
                .iter()
                .enumerate()
                .map(|(i, &width)| {
                    let text = row.cells.get(i).map(|c| c.text.as_str()).unwrap_or("");
                    fit_to_width(text, width)
                }),
        );
        lines.push(cells.join(SEPARATOR).trim_end().to_string());
    }

    if let Some(pagination) = &grid.pagination {
        lines.push(String::new());
        lines.extend(render_pagination(pagination));
    }

    lines.join("\n")
}

fn render_pagination(pagination: &PaginationView) -> [String; 2] {
    let info = format!(
        "Showing {} - {} of {} items · {} per page",
        pagination.first_item, pagination.last_item, pagination.total_items, pagination.page_size
    );

    let mut controls: Vec<String> = Vec::new();
    if pagination.has_prev {
        controls.push("← Prev".to_string());
    }
    controls.extend(pagination.pages.iter().map(|&page| {
        if page == pagination.current_page {
            format!("[{page}]")
        } else {
            page.to_string()
        }
    }));
    if pagination.has_next {
        controls.push("Next →".to_string());
    }

    [info, controls.join(" ")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;
    use crate::model::RowId;
    use crate::sort::SortIndicator;
    use crate::table::{Cell, EmptyView, LoadingView, RowView};

    fn header(title: &str, sort: Option<SortIndicator>) -> HeaderCell {
        HeaderCell {
            title: title.to_string(),
            width: None,
            class: None,
            sort,
        }
    }

    fn row(id: i64, selected: Option<bool>, cells: &[&str]) -> RowView {
        RowView {
            id: RowId::from(id),
            selected,
            clickable: false,
            cells: cells.iter().map(|c| Cell::text(*c)).collect(),
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Ana", 5), "Ana");
        assert_eq!(truncate_to_width("Mariana López", 6), "Maria…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_fit_to_width_pads_wide_chars() {
        assert_eq!(fit_to_width("日本", 6), "日本  ");
        assert_eq!(display_width(&fit_to_width("García", 10)), 10);
    }

    #[test]
    fn test_render_loading_and_empty() {
        let loading = TableView::Loading(LoadingView { columns: 2, rows: 3 });
        let text = render_text(&loading);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l == "░░░░░░░░ │ ░░░░░░░░"));

        let empty = TableView::Empty(EmptyView {
            message: "No data to display".to_string(),
        });
        assert_eq!(render_text(&empty), "📋 No data to display");
    }

    #[test]
    fn test_render_grid() {
        let grid = GridView {
            select_all: Some(false),
            header: vec![
                header("Name", Some(SortIndicator::Ascending)),
                header("Grade", None),
            ],
            rows: vec![
                row(1, Some(true), &["Ana", "3"]),
                row(2, Some(false), &["Carlos", "5"]),
            ],
            pagination: None,
        };
        let text = render_text(&TableView::Grid(grid));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "[ ] │ Name ↑ │ Grade");
        assert_eq!(lines[1], "────┼────────┼──────");
        assert_eq!(lines[2], "[x] │ Ana    │ 3");
        assert_eq!(lines[3], "[ ] │ Carlos │ 5");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_pagination_bar() {
        let grid = GridView {
            select_all: None,
            header: vec![header("Name", None)],
            rows: vec![row(11, None, &["Student 11"])],
            pagination: Some(PaginationView {
                current_page: 2,
                total_pages: 3,
                total_items: 23,
                page_size: 10,
                first_item: 11,
                last_item: 20,
                pages: vec![1, 2, 3],
                page_sizes: &PageSize::ALL,
                has_prev: true,
                has_next: true,
            }),
        };
        let text = render_text(&TableView::Grid(grid));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[lines.len() - 2], "Showing 11 - 20 of 23 items · 10 per page");
        assert_eq!(lines[lines.len() - 1], "← Prev 1 [2] 3 Next →");
    }
}
