//! Advanced filters composed with the search term.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::FieldPath;
use crate::model::Row;

/// One option of a select filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// How a filter constrains its field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKind {
    /// Case-insensitive substring match.
    Text,
    /// Exact match against one of the options.
    Select { options: Vec<FilterOption> },
    /// When checked, the field must be truthy.
    Checkbox { label: String },
}

impl FilterKind {
    /// Whether `value` has the shape this kind of filter takes.
    pub fn accepts(&self, value: &FilterValue) -> bool {
        matches!(
            (self, value),
            (FilterKind::Text | FilterKind::Select { .. }, FilterValue::Text(_))
                | (FilterKind::Checkbox { .. }, FilterValue::Checked(_))
        )
    }
}

/// A named filter over one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDef {
    pub name: String,
    pub label: String,
    pub field: FieldPath,
    pub kind: FilterKind,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FilterDef {
    /// Text filter.
    pub fn text(
        name: impl Into<String>,
        label: impl Into<String>,
        field: impl Into<FieldPath>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field: field.into(),
            kind: FilterKind::Text,
            placeholder: None,
        }
    }

    /// Select filter with the given options.
    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        field: impl Into<FieldPath>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field: field.into(),
            kind: FilterKind::Select { options },
            placeholder: None,
        }
    }

    /// Checkbox filter.
    pub fn checkbox(
        name: impl Into<String>,
        label: impl Into<String>,
        field: impl Into<FieldPath>,
        checkbox_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field: field.into(),
            kind: FilterKind::Checkbox {
                label: checkbox_label.into(),
            },
            placeholder: None,
        }
    }

    /// Sets the input placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// The value this filter resets to.
    pub fn empty_value(&self) -> FilterValue {
        match self.kind {
            FilterKind::Checkbox { .. } => FilterValue::Checked(false),
            _ => FilterValue::Text(String::new()),
        }
    }
}

/// Current value of one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Checked(bool),
}

impl FilterValue {
    /// `false` for an empty string or an unchecked box.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::Checked(checked) => *checked,
        }
    }
}

/// A set of advanced filters and their current values.
///
/// A row passes when it satisfies every active filter.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    defs: Vec<FilterDef>,
    values: BTreeMap<String, FilterValue>,
    expanded: bool,
}

impl FilterSet {
    /// Creates a filter set with every filter empty.
    pub fn new(defs: Vec<FilterDef>) -> Self {
        let values = defs
            .iter()
            .map(|def| (def.name.clone(), def.empty_value()))
            .collect();
        Self {
            defs,
            values,
            expanded: false,
        }
    }

    /// The filter definitions.
    pub fn defs(&self) -> &[FilterDef] {
        &self.defs
    }

    /// The current value of a filter.
    pub fn value(&self, name: &str) -> Option<&FilterValue> {
        self.values.get(name)
    }

    /// Sets a filter value.
    ///
    /// Returns `false`, leaving the filter unchanged, for an unknown name or
    /// a value the filter's kind does not take.
    pub fn set(&mut self, name: &str, value: FilterValue) -> bool {
        let Some(def) = self.defs.iter().find(|def| def.name == name) else {
            log::warn!("Filters: unknown filter '{}'", name);
            return false;
        };
        if !def.kind.accepts(&value) {
            log::warn!("Filters: {:?} does not fit filter '{}'", value, name);
            return false;
        }
        log::trace!("Filters: {} = {:?}", name, value);
        self.values.insert(def.name.clone(), value);
        true
    }

    /// Number of filters with a non-empty value.
    pub fn active_count(&self) -> usize {
        self.values.values().filter(|v| v.is_active()).count()
    }

    /// Restores every filter to its empty value.
    pub fn reset(&mut self) {
        for def in &self.defs {
            self.values.insert(def.name.clone(), def.empty_value());
        }
    }

    /// Whether the filter panel is expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Expands or collapses the filter panel.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Returns `true` if `row` satisfies every active filter.
    pub fn matches<R: Row>(&self, row: &R) -> bool {
        self.defs.iter().all(|def| {
            let Some(value) = self.values.get(&def.name).filter(|v| v.is_active()) else {
                return true;
            };
            let field = row.field(&def.field);
            match (&def.kind, value) {
                (FilterKind::Text, FilterValue::Text(term)) => field
                    .and_then(|v| v.search_text())
                    .is_some_and(|text| text.contains(&term.to_lowercase())),
                (FilterKind::Select { .. }, FilterValue::Text(selected)) => {
                    field.is_some_and(|v| v.display_text() == *selected)
                }
                (FilterKind::Checkbox { .. }, FilterValue::Checked(_)) => {
                    field.is_some_and(|v| v.is_truthy())
                }
                // `set` never stores a mismatched value.
                _ => true,
            }
        })
    }
}
