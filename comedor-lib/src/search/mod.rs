//! Search/filter engine.
//!
//! A [`Search`] holds the typed term and the term currently in effect. Typing
//! schedules the term through a [`Debouncer`]; only the last term of a burst
//! is applied. Clearing the term applies immediately. Filtering itself is a
//! pure function of the applied term and whatever rows are passed in, so it
//! is simply re-run when the data changes.

mod filters;
mod suggestions;

pub use filters::{FilterDef, FilterKind, FilterOption, FilterSet, FilterValue};
pub use suggestions::{Suggestion, SuggestionKey, Suggestions};

use std::fmt;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::model::FieldPath;
use crate::model::Row;
use crate::schedule::Debouncer;

/// Called with a search term: the raw typed text for `on_search`, the term
/// taking effect for `on_apply`.
pub type SearchCallback = Box<dyn FnMut(&str) + Send>;

/// Returns `true` if any field's value contains `folded_term`.
///
/// `folded_term` must already be lower-cased. Absent values never match.
pub fn matches_term<R: Row>(row: &R, fields: &[FieldPath], folded_term: &str) -> bool {
    fields.iter().any(|field| {
        row.field(field)
            .and_then(|value| value.search_text())
            .is_some_and(|text| text.contains(folded_term))
    })
}

/// Debounced substring search over a set of fields.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use comedor_lib::config::SearchConfig;
/// use comedor_lib::schedule::{Clock, ManualClock};
/// use comedor_lib::search::Search;
/// use serde_json::json;
///
/// let rows = vec![json!({"name": "Ana García"}), json!({"name": "Carlos"})];
/// let clock = ManualClock::new();
/// let mut search = Search::new(SearchConfig::new(["name"]));
///
/// search.set_term("ana", clock.now());
/// assert!(search.is_searching());
///
/// clock.advance(Duration::from_millis(300));
/// assert!(search.poll(clock.now()));
/// assert_eq!(search.filter(&rows).len(), 1);
/// ```
pub struct Search {
    fields: Vec<FieldPath>,
    term: String,
    applied: Option<String>,
    debouncer: Debouncer<String>,
    on_search: Option<SearchCallback>,
    on_apply: Option<SearchCallback>,
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("fields", &self.fields)
            .field("term", &self.term)
            .field("applied", &self.applied)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl Search {
    /// Creates an idle search with an empty term.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            fields: config.fields,
            term: String::new(),
            applied: None,
            debouncer: Debouncer::new(config.debounce),
            on_search: None,
            on_apply: None,
        }
    }

    /// Registers the callback fired with the raw term on every input change,
    /// blank terms included.
    pub fn on_search(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_search = Some(Box::new(callback));
    }

    /// Registers the callback fired when a term takes effect after the
    /// debounce, or with `""` when an applied term is cleared.
    pub fn on_apply(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_apply = Some(Box::new(callback));
    }

    /// The searched fields.
    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }

    /// The term as last typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The term currently filtering rows, if any.
    pub fn applied_term(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    /// `true` only while a typed term waits out the debounce window.
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// When the pending term will be applied.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Updates the typed term.
    ///
    /// A blank term cancels any pending term and clears the filter at once.
    /// Anything else is applied by [`poll`](Self::poll) after the debounce
    /// delay, replacing any term still pending. Returns `true` if the filter
    /// changed immediately.
    pub fn set_term(&mut self, term: impl Into<String>, now: Instant) -> bool {
        let term = term.into();
        self.term = term.clone();
        if let Some(callback) = self.on_search.as_mut() {
            callback(&term);
        }

        if term.trim().is_empty() {
            self.debouncer.cancel();
            let was_applied = self.applied.take().is_some();
            if was_applied {
                log::debug!("Search: cleared");
                self.notify_applied("");
            }
            return was_applied;
        }

        log::trace!("Search: scheduled '{}'", term);
        self.debouncer.schedule(term, now);
        false
    }

    /// Applies the pending term if its debounce window has elapsed.
    /// Returns `true` if a term was applied.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(term) = self.debouncer.poll(now) else {
            return false;
        };
        log::debug!("Search: applied '{}'", term);
        self.notify_applied(&term);
        self.applied = Some(term);
        true
    }

    /// Drops the term and any pending filter without notifying.
    pub fn reset(&mut self) {
        self.term.clear();
        self.applied = None;
        self.debouncer.cancel();
    }

    /// Returns `true` if `row` passes the applied term.
    pub fn matches<R: Row>(&self, row: &R) -> bool {
        match &self.applied {
            None => true,
            Some(term) => matches_term(row, &self.fields, &term.to_lowercase()),
        }
    }

    /// Positions of the rows passing the applied term, in original order.
    pub fn filter_indices<R: Row>(&self, rows: &[R]) -> Vec<usize> {
        let Some(term) = &self.applied else {
            return (0..rows.len()).collect();
        };
        let folded = term.to_lowercase();
        rows.iter()
            .enumerate()
            .filter(|(_, row)| matches_term(*row, &self.fields, &folded))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows passing the applied term, in original order.
    pub fn filter<'a, R: Row>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.filter_indices(rows)
            .into_iter()
            .map(|i| &rows[i])
            .collect()
    }

    fn notify_applied(&mut self, term: &str) {
        if let Some(callback) = self.on_apply.as_mut() {
            callback(term);
        }
    }
}
