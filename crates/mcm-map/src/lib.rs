pub mod engine;
pub mod error;
pub mod matcher;
pub mod repository;

pub use engine::{PreviousMapping, build_column_mapping};
pub use error::MatchError;
pub use matcher::{DEFAULT_MIN_CONFIDENCE, is_known, rank, similarity};
pub use repository::{MappingMetadata, MappingRepository, StoredMapping};
