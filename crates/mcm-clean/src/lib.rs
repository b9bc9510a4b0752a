pub mod cleaner;
pub mod cleaners;
pub mod error;

pub use cleaner::Cleaner;
pub use cleaners::{
    BOOL_SYNONYMS, NONE_SYNONYMS, bool_cleaner, date_cleaner, default_cleaner, enum_cleaner,
    float_cleaner,
};
pub use error::CleanError;
