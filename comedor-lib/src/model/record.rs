//! Dynamic record

use std::collections::BTreeMap;

use super::FieldPath;
use super::Row;
use super::RowId;
use super::Value;
use crate::error::DatasetError;

/// A dynamic record with named fields.
///
/// Records hold field values as a `BTreeMap<String, Value>`; nested data is
/// stored as [`Value::Object`] and reached with dotted paths.
///
/// # Example
///
/// ```
/// use comedor_lib::model::{FieldPath, Record, Row, Value};
///
/// let record = Record::new()
///     .set("id", 7)
///     .set("name", "Mariana");
///
/// assert_eq!(record.field(&FieldPath::from("name")), Some(Value::from("Mariana")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DatasetError> {
        match Value::from(value) {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DatasetError::NotAnObject {
                index: 0,
                actual: other.type_name(),
            }),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to a top-level field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to the value at a dotted path.
    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        self.fields.get(path.head())?.lookup(path.tail())
    }

    /// Returns `true` if the record contains the given top-level field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl Row for Record {
    fn id(&self) -> Option<RowId> {
        self.fields.get("id").and_then(RowId::from_value)
    }

    fn field(&self, path: &FieldPath) -> Option<Value> {
        self.get_path(path).filter(|v| !v.is_null()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object() {
        let record = Record::from_json(json!({
            "id": "est-1",
            "name": "Carlos",
            "guardian": { "name": "Lucía", "phone": "300 111 2233" }
        }))
        .unwrap();

        assert_eq!(record.id(), Some(RowId::from("est-1")));
        assert_eq!(
            record.field(&FieldPath::from("guardian.name")),
            Some(Value::from("Lucía"))
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnObject { actual: "list", .. }));
    }

    #[test]
    fn test_null_field_is_absent() {
        let record = Record::new().set("allergies", Value::Null);
        assert!(record.contains("allergies"));
        assert_eq!(record.field(&FieldPath::from("allergies")), None);
    }

    #[test]
    fn test_record_without_id() {
        let record = Record::new().set("name", "Ana");
        assert_eq!(record.id(), None);
    }
}
