//! Row data model: dynamic values, dotted paths, records and datasets.

mod dataset;
mod path;
mod record;
mod row;
mod value;

pub use dataset::Dataset;
pub use path::FieldPath;
pub use record::Record;
pub use row::Row;
pub use row::RowId;
pub use value::Value;
