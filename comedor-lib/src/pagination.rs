//! Pagination engine.
//!
//! Derives the visible page window from a collection length, a current page
//! and a page size. Page numbers are 1-based. Out-of-range navigation clamps
//! instead of failing.
//!
//! An empty collection has zero pages; the current page then stays at 1 and
//! the page is empty.

use std::ops::Range;

/// Number of pages needed for `total_items` rows at `page_size` rows per page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Pagination state over a collection of known length.
///
/// # Example
///
/// ```
/// use comedor_lib::pagination::Pagination;
///
/// let mut pages = Pagination::new(10).with_total_items(42);
/// assert_eq!(pages.total_pages(), 5);
///
/// pages.go_to_page(99);
/// assert_eq!(pages.current_page(), 5);
/// assert_eq!(pages.range(), 40..42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pagination {
    /// Creates pagination on page 1. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// Sets the collection length (builder pattern).
    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Length of the paginated collection.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / page_size)`; zero for an empty collection.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Returns `true` if a later page exists.
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Updates the collection length.
    ///
    /// The current page is left alone; call [`clamp`](Self::clamp) when it
    /// must stay in range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
    }

    /// Changes the page size. A size of 0 is treated as 1.
    ///
    /// The current page is not re-clamped here: after a resize it may point
    /// past the last page until [`clamp`](Self::clamp) is called.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        log::debug!(
            "Pagination: page size {} ({} pages)",
            self.page_size,
            self.total_pages()
        );
    }

    /// Moves to `page`, clamped into `[1, total_pages]` (or 1 when there are
    /// no pages). Returns the resulting page.
    pub fn go_to_page(&mut self, page: i64) -> usize {
        let last = self.total_pages().max(1) as i64;
        let target = page.clamp(1, last) as usize;
        if target != self.current_page {
            log::trace!("Pagination: page {} -> {}", self.current_page, target);
        }
        self.current_page = target;
        target
    }

    /// Re-applies the clamp to the current page.
    pub fn clamp(&mut self) -> usize {
        self.go_to_page(self.current_page as i64)
    }

    /// Moves one page forward (clamped).
    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 + 1)
    }

    /// Moves one page back (clamped).
    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 - 1)
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) -> usize {
        self.go_to_page(1)
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) -> usize {
        self.go_to_page(self.total_pages() as i64)
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Index range of the current page, bounded by `total_items`.
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    /// Returns the slice of `data` on the current page.
    ///
    /// Bounded by `data.len()` as well, so a stale `total_items` never
    /// panics.
    pub fn paginate<'a, T>(&self, data: &'a [T]) -> &'a [T] {
        let range = self.range();
        let start = range.start.min(data.len());
        let end = range.end.min(data.len());
        &data[start..end]
    }

    /// 1-based `(first, last)` item numbers shown on the current page, or
    /// `None` when the page is empty.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        let range = self.range();
        if range.is_empty() {
            None
        } else {
            Some((range.start + 1, range.end))
        }
    }

    /// Page numbers for a pagination bar of at most `width` buttons,
    /// centred on the current page and shifted left near the end.
    pub fn page_window(&self, width: usize) -> Vec<usize> {
        let total = self.total_pages();
        if width == 0 || total == 0 {
            return Vec::new();
        }

        let mut start = self.current_page.saturating_sub(width / 2).max(1);
        let end = (start + width - 1).min(total);
        if end + 1 < start + width {
            start = (end + 1).saturating_sub(width).max(1);
        }
        (start..=end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_and_page_sizes_cover_all_items() {
        for size in 1..=12 {
            for n in 0..=40 {
                let mut pages = Pagination::new(size).with_total_items(n);
                assert_eq!(pages.total_pages(), n.div_ceil(size));

                let mut sum = 0;
                for page in 1..=pages.total_pages() {
                    pages.go_to_page(page as i64);
                    sum += pages.range().len();
                }
                assert_eq!(sum, n);
            }
        }
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut pages = Pagination::new(10).with_total_items(35);
        assert_eq!(pages.go_to_page(0), 1);
        assert_eq!(pages.go_to_page(-5), 1);
        assert_eq!(pages.go_to_page(104), 4);
        assert_eq!(pages.current_page(), 4);
    }

    #[test]
    fn test_empty_collection_has_zero_pages() {
        let mut pages = Pagination::new(10);
        assert_eq!(pages.total_pages(), 0);
        assert_eq!(pages.go_to_page(3), 1);
        assert_eq!(pages.last_page(), 1);
        assert!(pages.range().is_empty());
        assert!(!pages.has_next_page());
        assert!(!pages.has_prev_page());
        assert_eq!(pages.item_range(), None);
        assert!(pages.page_window(5).is_empty());

        let data: [u8; 0] = [];
        assert!(pages.paginate(&data).is_empty());
    }

    #[test]
    fn test_navigation() {
        let mut pages = Pagination::new(5).with_total_items(12);
        assert!(pages.has_next_page());
        assert!(!pages.has_prev_page());

        assert_eq!(pages.next_page(), 2);
        assert_eq!(pages.next_page(), 3);
        assert_eq!(pages.next_page(), 3);
        assert!(!pages.has_next_page());
        assert_eq!(pages.prev_page(), 2);
        assert_eq!(pages.first_page(), 1);
        assert_eq!(pages.prev_page(), 1);
        assert_eq!(pages.last_page(), 3);
    }

    #[test]
    fn test_paginate_slices_data() {
        let data: Vec<u32> = (1..=12).collect();
        let mut pages = Pagination::new(5).with_total_items(data.len());
        assert_eq!(pages.paginate(&data), &[1, 2, 3, 4, 5]);
        pages.last_page();
        assert_eq!(pages.paginate(&data), &[11, 12]);
        assert_eq!(pages.item_range(), Some((11, 12)));
    }

    #[test]
    fn test_resize_does_not_reclamp() {
        let mut pages = Pagination::new(5).with_total_items(20);
        pages.last_page();
        assert_eq!(pages.current_page(), 4);

        pages.set_page_size(50);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.current_page(), 4);
        assert!(pages.range().is_empty());

        assert_eq!(pages.clamp(), 1);
        assert_eq!(pages.range(), 0..20);
    }

    #[test]
    fn test_stale_total_does_not_panic() {
        let data = [1, 2, 3];
        let pages = Pagination::new(10).with_total_items(50);
        assert_eq!(pages.paginate(&data), &[1, 2, 3]);
    }

    #[test]
    fn test_page_window() {
        let mut pages = Pagination::new(10).with_total_items(200);
        assert_eq!(pages.page_window(5), vec![1, 2, 3, 4, 5]);

        pages.go_to_page(10);
        assert_eq!(pages.page_window(5), vec![8, 9, 10, 11, 12]);

        pages.go_to_page(20);
        assert_eq!(pages.page_window(5), vec![16, 17, 18, 19, 20]);

        let short = Pagination::new(10).with_total_items(25);
        assert_eq!(short.page_window(5), vec![1, 2, 3]);
    }
}
