pub mod csv_source;
pub mod error;
pub mod schema_loader;

pub use csv_source::{CsvRowSource, RowSource};
pub use error::IngestError;
pub use schema_loader::load_schema;
