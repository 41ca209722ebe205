//! Selection tracker.
//!
//! Tracks selected rows by [`RowId`], so a selection stays stable across
//! paging, sorting and filtering. Select-all covers exactly the ids it is
//! given; a table passes the ids of the current page.

use std::collections::HashSet;
use std::fmt;

use crate::model::RowId;

/// Called with the full selected-id list whenever the selection changes.
pub type SelectionCallback = Box<dyn FnMut(&[RowId]) + Send>;

/// ID-based selection state with a change callback.
#[derive(Default)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<RowId>,
    /// Change listener
    on_change: Option<SelectionCallback>,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("selected", &self.selected_ids())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the change callback, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&[RowId]) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Check if every given ID is selected. False for an empty list.
    pub fn all_selected(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle selection of an ID.
    /// Returns whether the ID is selected afterwards.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        let selected = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        };
        self.notify();
        selected
    }

    /// Set the selection state of one ID (checkbox semantics).
    /// Returns `true` if the selection changed.
    pub fn set(&mut self, id: &RowId, selected: bool) -> bool {
        let changed = if selected {
            self.selected.insert(id.clone())
        } else {
            self.selected.remove(id)
        };
        if changed {
            self.notify();
        }
        changed
    }

    /// Replace the selection with exactly the given IDs.
    /// Returns `true` if the selection changed.
    pub fn select_all(&mut self, ids: &[RowId]) -> bool {
        let next: HashSet<RowId> = ids.iter().cloned().collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        self.notify();
        true
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        let mut removed: Vec<_> = self.selected.drain().collect();
        removed.sort();
        if !removed.is_empty() {
            self.notify();
        }
        removed
    }

    /// Drop every selected ID for which `keep` returns false.
    /// Returns the IDs that were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&RowId) -> bool) -> Vec<RowId> {
        let mut removed: Vec<_> = self
            .selected
            .iter()
            .filter(|id| !keep(*id))
            .cloned()
            .collect();
        if removed.is_empty() {
            return removed;
        }
        for id in &removed {
            self.selected.remove(id);
        }
        removed.sort();
        self.notify();
        removed
    }

    fn notify(&mut self) {
        let ids = self.selected_ids();
        log::trace!("Selection: {} selected", ids.len());
        if let Some(callback) = self.on_change.as_mut() {
            callback(&ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ids(range: std::ops::RangeInclusive<i64>) -> Vec<RowId> {
        range.map(RowId::Int).collect()
    }

    fn recording(selection: &mut Selection) -> Arc<Mutex<Vec<Vec<RowId>>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        selection.on_change(move |ids| sink.lock().unwrap().push(ids.to_vec()));
        calls
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = RowId::Int(1);

        assert!(selection.toggle(&id));
        assert!(selection.is_selected(&id));
        assert!(!selection.toggle(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces_selection() {
        let mut selection = Selection::new();
        selection.toggle(&RowId::Int(99));

        let page = ids(1..=5);
        assert!(selection.select_all(&page));
        for id in &page {
            assert!(selection.is_selected(id));
        }
        assert!(!selection.is_selected(&RowId::Int(6)));
        assert!(!selection.is_selected(&RowId::Int(99)));
        assert!(selection.all_selected(&page));
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn test_clear_empties_selection() {
        let mut selection = Selection::new();
        selection.select_all(&ids(1..=3));
        assert_eq!(selection.clear(), ids(1..=3));
        assert!(selection.is_empty());
        assert!(selection.clear().is_empty());
    }

    #[test]
    fn test_callback_receives_full_list_on_change() {
        let mut selection = Selection::new();
        let calls = recording(&mut selection);

        selection.toggle(&RowId::Int(2));
        selection.toggle(&RowId::Int(1));
        selection.set(&RowId::Int(1), true);
        selection.select_all(&ids(1..=2));
        selection.clear();

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec![ids(2..=2), ids(1..=2), Vec::new()]);
    }

    #[test]
    fn test_retain_prunes_missing_ids() {
        let mut selection = Selection::new();
        selection.select_all(&ids(1..=4));

        let removed = selection.retain(|id| *id != RowId::Int(2) && *id != RowId::Int(4));
        assert_eq!(removed, vec![RowId::Int(2), RowId::Int(4)]);
        assert_eq!(selection.selected_ids(), vec![RowId::Int(1), RowId::Int(3)]);
    }
}
