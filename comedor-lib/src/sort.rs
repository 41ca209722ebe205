//! Sort engine.
//!
//! Orders rows by the value at a dotted path. The ordering is total and
//! stable:
//!
//! - absent values (missing path or null) sort after every present value,
//!   in both directions;
//! - a column whose present values are incomparable (mismatched types,
//!   lists, objects) is treated as all-equal, so rows keep their original
//!   relative order;
//! - ties keep their original relative order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::model::FieldPath;
use crate::model::Row;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// Custom ordering for a column whose values have no default order.
///
/// Only called when both values are present. Must be a total order.
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Current sort: a key (or none) and a direction.
///
/// A `None` key preserves the original collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    key: Option<FieldPath>,
    direction: Direction,
}

/// Header indicator for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Symbol drawn next to the column title.
    pub fn symbol(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

impl fmt::Display for SortIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl SortState {
    /// No sort: original order.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by `key` in the given direction.
    pub fn by(key: impl Into<FieldPath>, direction: Direction) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// The current sort key.
    pub fn key(&self) -> Option<&FieldPath> {
        self.key.as_ref()
    }

    /// The current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if sorting by `key`.
    pub fn is_sorted_by(&self, key: &FieldPath) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Toggles sort for a key.
    ///
    /// The same key flips the direction; a new key starts ascending.
    pub fn toggle(&mut self, key: impl Into<FieldPath>) -> &Self {
        let key = key.into();
        self.direction = if self.is_sorted_by(&key) {
            self.direction.reverse()
        } else {
            Direction::Asc
        };
        log::debug!("Sort: {} {:?}", key, self.direction);
        self.key = Some(key);
        self
    }

    /// Clears the sort, restoring original order.
    pub fn clear(&mut self) {
        self.key = None;
        self.direction = Direction::Asc;
    }

    /// Header indicator for the column with `key`.
    pub fn indicator(&self, key: &FieldPath) -> SortIndicator {
        match (self.is_sorted_by(key), self.direction) {
            (false, _) => SortIndicator::Unsorted,
            (true, Direction::Asc) => SortIndicator::Ascending,
            (true, Direction::Desc) => SortIndicator::Descending,
        }
    }
}

/// How present values of the sort column are ordered.
#[derive(Clone, Copy)]
enum KeyOrder<'a> {
    /// Column-supplied comparator.
    Custom(&'a Comparator),
    /// Every present value belongs to one comparable class.
    Class(KeyClass),
    /// Mixed or non-scalar values: present rows keep their order.
    Unordered,
}

/// Comparable class of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Bool,
    Int,
    Number,
    Text,
    Date,
}

impl KeyClass {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(KeyClass::Bool),
            Value::Int(_) => Some(KeyClass::Int),
            Value::Float(_) => Some(KeyClass::Number),
            Value::String(_) => Some(KeyClass::Text),
            Value::DateTime(_) => Some(KeyClass::Date),
            _ => None,
        }
    }

    fn merge(self, other: KeyClass) -> Option<KeyClass> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (KeyClass::Int | KeyClass::Number, KeyClass::Int | KeyClass::Number) => {
                Some(KeyClass::Number)
            }
            _ => None,
        }
    }

    /// Total order within the class. Mixed integers and floats compare as
    /// `f64` with `total_cmp`.
    fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            KeyClass::Number => as_f64(a).total_cmp(&as_f64(b)),
            _ => a.compare(b).unwrap_or(Ordering::Equal),
        }
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(f) => *f,
        _ => f64::NAN,
    }
}

/// Finds the common class of the present values, if there is one.
fn key_order<'a>(
    values: &[(usize, Option<Value>)],
    comparator: Option<&'a Comparator>,
) -> KeyOrder<'a> {
    if let Some(comparator) = comparator {
        return KeyOrder::Custom(comparator);
    }

    let mut class: Option<KeyClass> = None;
    for value in values.iter().filter_map(|(_, v)| v.as_ref()) {
        let Some(next) = KeyClass::of(value) else {
            log::debug!("Sort: {} values are not comparable", value.type_name());
            return KeyOrder::Unordered;
        };
        class = match class {
            None => Some(next),
            Some(current) => match current.merge(next) {
                Some(merged) => Some(merged),
                None => {
                    log::debug!("Sort: mixed value types in sort column");
                    return KeyOrder::Unordered;
                }
            },
        };
    }
    class.map(KeyOrder::Class).unwrap_or(KeyOrder::Unordered)
}

fn compare_keys(
    a: Option<&Value>,
    b: Option<&Value>,
    direction: Direction,
    order: KeyOrder<'_>,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = match order {
                KeyOrder::Custom(compare) => compare(a, b),
                KeyOrder::Class(class) => class.compare(a, b),
                KeyOrder::Unordered => Ordering::Equal,
            };
            direction.apply(ordering)
        }
    }
}

/// Orders `indices` (positions into `rows`) by the sort state.
///
/// Returns the indices unchanged when there is no sort key. The sort is
/// stable, and `rows` is never touched. Absent values go last regardless of
/// direction. Present values are ordered by `comparator` when given;
/// otherwise they must all share one comparable type (numbers, strings,
/// booleans or dates), and a column mixing types is left in its original
/// order.
pub fn sort_indices<R: Row>(
    rows: &[R],
    indices: Vec<usize>,
    state: &SortState,
    comparator: Option<&Comparator>,
) -> Vec<usize> {
    let Some(key) = state.key() else {
        return indices;
    };

    let mut keyed: Vec<(usize, Option<Value>)> = indices
        .into_iter()
        .map(|i| (i, rows.get(i).and_then(|row| row.field(key))))
        .collect();

    let order = key_order(&keyed, comparator);
    keyed.sort_by(|(_, a), (_, b)| compare_keys(a.as_ref(), b.as_ref(), state.direction(), order));

    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Returns references to `rows` in sorted order without mutating the source.
pub fn sorted<'a, R: Row>(rows: &'a [R], state: &SortState) -> Vec<&'a R> {
    sort_indices(rows, (0..rows.len()).collect(), state, None)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RowId};

    fn row(id: i64, k: impl Into<Value>) -> Record {
        Record::new().set("id", id).set("k", k)
    }

    fn ids(rows: &[&Record]) -> Vec<RowId> {
        rows.iter().filter_map(|r| r.id()).collect()
    }

    #[test]
    fn test_sort_is_stable() {
        let rows = vec![row(1, 1), row(2, 1), row(3, 0)];
        let out = sorted(&rows, &SortState::by("k", Direction::Asc));
        assert_eq!(ids(&out), vec![RowId::Int(3), RowId::Int(1), RowId::Int(2)]);

        let out = sorted(&rows, &SortState::by("k", Direction::Desc));
        assert_eq!(ids(&out), vec![RowId::Int(1), RowId::Int(2), RowId::Int(3)]);
    }

    #[test]
    fn test_no_key_preserves_order() {
        let rows = vec![row(2, 5), row(1, 3)];
        let out = sorted(&rows, &SortState::none());
        assert_eq!(ids(&out), vec![RowId::Int(2), RowId::Int(1)]);
    }

    #[test]
    fn test_absent_values_sort_last_in_both_directions() {
        let rows = vec![
            Record::new().set("id", 1),
            row(2, "b"),
            row(3, Value::Null),
            row(4, "a"),
        ];

        let asc = sorted(&rows, &SortState::by("k", Direction::Asc));
        assert_eq!(
            ids(&asc),
            vec![RowId::Int(4), RowId::Int(2), RowId::Int(1), RowId::Int(3)]
        );

        let desc = sorted(&rows, &SortState::by("k", Direction::Desc));
        assert_eq!(
            ids(&desc),
            vec![RowId::Int(2), RowId::Int(4), RowId::Int(1), RowId::Int(3)]
        );
    }

    #[test]
    fn test_incomparable_values_keep_order() {
        let rows = vec![
            row(1, Value::List(vec![Value::Int(9)])),
            row(2, "texto"),
            row(3, 4),
        ];
        let out = sorted(&rows, &SortState::by("k", Direction::Asc));
        assert_eq!(ids(&out), vec![RowId::Int(1), RowId::Int(2), RowId::Int(3)]);
    }

    #[test]
    fn test_mixed_types_keep_order_but_absent_goes_last() {
        let rows = vec![row(1, "b"), Record::new().set("id", 2), row(3, 1)];
        let out = sorted(&rows, &SortState::by("k", Direction::Desc));
        assert_eq!(ids(&out), vec![RowId::Int(1), RowId::Int(3), RowId::Int(2)]);
    }

    #[test]
    fn test_ints_and_floats_sort_numerically() {
        let rows = vec![row(1, 2.5), row(2, 1), row(3, f64::NAN), row(4, 3)];
        let out = sorted(&rows, &SortState::by("k", Direction::Asc));
        assert_eq!(
            ids(&out),
            vec![RowId::Int(2), RowId::Int(1), RowId::Int(4), RowId::Int(3)]
        );
    }

    #[test]
    fn test_sort_does_not_mutate_source() {
        let rows = vec![row(1, 3), row(2, 1)];
        let before = rows.clone();
        let _ = sorted(&rows, &SortState::by("k", Direction::Asc));
        assert_eq!(rows, before);
    }

    #[test]
    fn test_custom_comparator() {
        let rows = vec![row(1, "medium"), row(2, "high"), row(3, "low")];
        let rank = |v: &Value| match v.as_str() {
            Some("low") => 0,
            Some("medium") => 1,
            _ => 2,
        };
        let comparator: Comparator = Arc::new(move |a, b| rank(a).cmp(&rank(b)));

        let out = sort_indices(
            &rows,
            vec![0, 1, 2],
            &SortState::by("k", Direction::Asc),
            Some(&comparator),
        );
        assert_eq!(out, vec![2, 0, 1]);
    }

    #[test]
    fn test_toggle() {
        let mut state = SortState::none();
        assert_eq!(state.key(), None);

        state.toggle("name");
        assert_eq!(state.direction(), Direction::Asc);
        state.toggle("name");
        assert_eq!(state.direction(), Direction::Desc);
        state.toggle("name");
        assert_eq!(state.direction(), Direction::Asc);

        state.toggle("name");
        state.toggle("grade");
        assert_eq!(state.key(), Some(&FieldPath::from("grade")));
        assert_eq!(state.direction(), Direction::Asc);

        assert_eq!(state.indicator(&FieldPath::from("grade")), SortIndicator::Ascending);
        assert_eq!(state.indicator(&FieldPath::from("name")), SortIndicator::Unsorted);

        state.clear();
        assert_eq!(state.key(), None);
    }

    #[test]
    fn test_sort_nested_path() {
        let rows = vec![
            Record::new().set("id", 1).set(
                "address",
                Value::Object([("city".to_string(), Value::from("Pasto"))].into()),
            ),
            Record::new().set("id", 2).set(
                "address",
                Value::Object([("city".to_string(), Value::from("Bogotá"))].into()),
            ),
        ];
        let out = sorted(&rows, &SortState::by("address.city", Direction::Asc));
        assert_eq!(ids(&out), vec![RowId::Int(2), RowId::Int(1)]);
    }
}
