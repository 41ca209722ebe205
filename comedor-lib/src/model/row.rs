//! Row trait and row identifiers.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::FieldPath;
use super::Value;

/// 2^63, the first float past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Stable identifier of a row.
///
/// Rows carry their own id (`Int` or `Text`). Rows ingested without one get a
/// `Synthetic` id assigned once by [`Dataset`](super::Dataset), so identity
/// survives filtering and re-sorting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
    Synthetic(Uuid),
}

impl RowId {
    /// Generates a fresh synthetic identifier.
    pub fn synthetic() -> Self {
        RowId::Synthetic(Uuid::new_v4())
    }

    /// Returns `true` if this id was generated at ingestion time.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, RowId::Synthetic(_))
    }

    /// Derives an id from a field value. Non-empty strings and integral
    /// numbers within the `i64` range qualify; anything else does not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(RowId::Int(*n)),
            Value::Float(f) if f.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(f) => {
                Some(RowId::Int(*f as i64))
            }
            Value::String(s) if !s.is_empty() => Some(RowId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
            RowId::Synthetic(uuid) => write!(f, "{}", uuid),
        }
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(v as i64)
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<u32> for RowId {
    fn from(v: u32) -> Self {
        RowId::Int(v as i64)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        RowId::Synthetic(v)
    }
}

/// Trait for records that can be displayed by a [`DataTable`](crate::table::DataTable).
///
/// Fields are addressed by dotted path. Returning `None` means the value is
/// absent: it never matches a search and sorts after every present value.
///
/// # Example
///
/// ```
/// use comedor_lib::model::{FieldPath, Row, RowId, Value};
///
/// struct Student {
///     id: u32,
///     name: String,
///     grade: Option<u32>,
/// }
///
/// impl Row for Student {
///     fn id(&self) -> Option<RowId> {
///         Some(RowId::from(self.id))
///     }
///
///     fn field(&self, path: &FieldPath) -> Option<Value> {
///         match path.as_str() {
///             "name" => Some(Value::from(self.name.as_str())),
///             "grade" => self.grade.map(Value::from),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the row's own identifier, if it has one.
    fn id(&self) -> Option<RowId>;

    /// Resolves a dotted path to a value.
    fn field(&self, path: &FieldPath) -> Option<Value>;
}

impl<R: Row + ?Sized> Row for &R {
    fn id(&self) -> Option<RowId> {
        (**self).id()
    }

    fn field(&self, path: &FieldPath) -> Option<Value> {
        (**self).field(path)
    }
}

impl Row for serde_json::Value {
    fn id(&self) -> Option<RowId> {
        self.get("id")
            .map(|v| Value::from(v.clone()))
            .and_then(|v| RowId::from_value(&v))
    }

    fn field(&self, path: &FieldPath) -> Option<Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment.as_str())?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        if current.is_null() {
            return None;
        }
        Some(Value::from(current.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_id_from_value() {
        assert_eq!(RowId::from_value(&Value::Int(4)), Some(RowId::Int(4)));
        assert_eq!(RowId::from_value(&Value::Float(4.0)), Some(RowId::Int(4)));
        assert_eq!(RowId::from_value(&Value::Float(4.5)), None);
        assert_eq!(RowId::from_value(&Value::from("")), None);
        assert_eq!(RowId::from_value(&Value::from("a-1")), Some(RowId::from("a-1")));
    }

    #[test]
    fn test_float_ids_outside_i64_range_do_not_qualify() {
        assert_eq!(RowId::from_value(&Value::Float(1e300)), None);
        assert_eq!(RowId::from_value(&Value::Float(-2e300)), None);
        assert_eq!(RowId::from_value(&Value::Float(I64_LIMIT)), None);
        assert_eq!(RowId::from_value(&Value::Float(f64::INFINITY)), None);
        assert_eq!(
            RowId::from_value(&Value::Float(-I64_LIMIT)),
            Some(RowId::Int(i64::MIN))
        );
    }

    #[test]
    fn test_synthetic_ids_are_unique() {
        let a = RowId::synthetic();
        let b = RowId::synthetic();
        assert!(a.is_synthetic());
        assert_ne!(a, b);
    }

    #[test]
    fn test_json_row_resolves_dotted_paths() {
        let row = json!({ "id": 3, "contact": { "email": "ana@umina.edu.co" }, "notes": null });
        assert_eq!(row.id(), Some(RowId::Int(3)));
        assert_eq!(
            row.field(&FieldPath::from("contact.email")),
            Some(Value::from("ana@umina.edu.co"))
        );
        assert_eq!(row.field(&FieldPath::from("contact.phone")), None);
        assert_eq!(row.field(&FieldPath::from("notes")), None);
    }
}
