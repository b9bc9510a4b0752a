pub mod cell;
pub mod error;
pub mod mapping;
pub mod record;
pub mod row;
pub mod schema;

pub use cell::CellValue;
pub use error::ModelError;
pub use mapping::{ColumnMapping, ColumnMatch};
pub use record::{DestRecord, GenericRecord};
pub use row::Row;
pub use schema::{FieldDef, FieldType, Schema};
