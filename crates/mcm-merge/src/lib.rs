pub mod apply;
pub mod batch;
pub mod error;
pub mod identity;

pub use apply::{RowMapping, apply_into, apply_row, merge_row};
pub use batch::{RowOutcome, apply_chunked, chunk_rows, process_chunked};
pub use error::{MappingError, MergeError};
pub use identity::{IdentityResolver, NaturalKey, NaturalKeyResolver, Resolution};
