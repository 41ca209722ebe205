//! Row ingestion with stable identities.

use std::collections::HashMap;

use super::Record;
use super::Row;
use super::RowId;
use crate::error::DatasetError;

/// An in-memory collection of rows, each with a stable [`RowId`].
///
/// Rows that do not carry an id get a synthetic one generated once here,
/// so selection and keying never depend on a row's position.
#[derive(Debug, Clone)]
pub struct Dataset<R> {
    rows: Vec<R>,
    ids: Vec<RowId>,
    index: HashMap<RowId, usize>,
}

impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            ids: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R: Row> Dataset<R> {
    /// Ingests rows, assigning synthetic ids where needed.
    ///
    /// Fails if two rows carry the same id.
    pub fn new(rows: Vec<R>) -> Result<Self, DatasetError> {
        let mut ids = Vec::with_capacity(rows.len());
        let mut index = HashMap::with_capacity(rows.len());
        let mut synthetic = 0usize;

        for (position, row) in rows.iter().enumerate() {
            let id = match row.id() {
                Some(id) => id,
                None => {
                    synthetic += 1;
                    RowId::synthetic()
                }
            };
            if index.insert(id.clone(), position).is_some() {
                return Err(DatasetError::DuplicateId { id });
            }
            ids.push(id);
        }

        if synthetic > 0 {
            log::debug!(
                "Dataset: assigned {} synthetic ids to {} rows",
                synthetic,
                rows.len()
            );
        }

        Ok(Self { rows, ids, index })
    }
}

impl<R> Dataset<R> {
    /// Returns the rows in ingestion order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Returns the ids, parallel to [`rows`](Self::rows).
    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    /// Returns the row at a position.
    pub fn get(&self, position: usize) -> Option<&R> {
        self.rows.get(position)
    }

    /// Returns the id of the row at a position.
    pub fn id_at(&self, position: usize) -> Option<&RowId> {
        self.ids.get(position)
    }

    /// Returns the position of the row with the given id.
    pub fn position_of(&self, id: &RowId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the row with the given id.
    pub fn find(&self, id: &RowId) -> Option<&R> {
        self.position_of(id).and_then(|p| self.rows.get(p))
    }

    /// Returns `true` if a row with the given id exists.
    pub fn contains(&self, id: &RowId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over `(id, row)` pairs in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = (&RowId, &R)> {
        self.ids.iter().zip(self.rows.iter())
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the dataset and returns the rows.
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl Dataset<Record> {
    /// Parses a JSON array of objects into a dataset of records.
    ///
    /// # Example
    ///
    /// ```
    /// use comedor_lib::model::Dataset;
    ///
    /// let json = r#"[{"id": 1, "name": "Ana"}, {"name": "Luis"}]"#;
    /// let dataset = Dataset::from_json(json).unwrap();
    /// assert_eq!(dataset.len(), 2);
    /// assert!(dataset.ids()[1].is_synthetic());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Builds a dataset from an already-parsed JSON array.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DatasetError> {
        let serde_json::Value::Array(items) = value else {
            return Err(DatasetError::NotAnArray {
                actual: json_type_name(&value),
            });
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                return Err(DatasetError::NotAnObject {
                    index,
                    actual: json_type_name(&item),
                });
            }
            records.push(Record::from_json(item)?);
        }
        Self::new(records)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_synthetic_ids_once() {
        let dataset = Dataset::from_json(r#"[{"id": 1}, {"name": "sin id"}]"#).unwrap();
        assert_eq!(dataset.ids()[0], RowId::Int(1));
        assert!(dataset.ids()[1].is_synthetic());

        let synthetic = dataset.ids()[1].clone();
        assert_eq!(dataset.position_of(&synthetic), Some(1));
        assert!(dataset.find(&synthetic).is_some());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Dataset::from_json(r#"[{"id": 1}, {"id": 1}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateId { id: RowId::Int(1) }));
    }

    #[test]
    fn test_huge_float_ids_get_synthetic_ids() {
        let dataset = Dataset::from_json(r#"[{"id": 1e300}, {"id": 2e300}]"#).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(dataset.ids().iter().all(RowId::is_synthetic));
        assert_ne!(dataset.ids()[0], dataset.ids()[1]);
    }

    #[test]
    fn test_rejects_non_array() {
        let err = Dataset::from_json(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnArray { actual: "object" }));

        let err = Dataset::from_json(r#"[{"id": 1}, 2]"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnObject { index: 1, actual: "number" }));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset: Dataset<Record> = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.iter().count(), 0);
    }
}
