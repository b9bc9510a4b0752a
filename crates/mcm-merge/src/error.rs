use thiserror::Error;

use mcm_clean::CleanError;

/// Identity resolution failed for a row.
///
/// The only error expected at meaningful frequency in normal operation:
/// real-world CSVs contain rows whose identity columns are blank or
/// garbage. Callers decide per row whether to skip or abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("required identity column `{0}` is missing from the row")]
    MissingIdentity(String),
    #[error("required identity column `{0}` has no usable value")]
    UnusableIdentity(String),
}

/// Anything that can go wrong while merging one row.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Identity(#[from] MappingError),
    #[error(transparent)]
    Clean(#[from] CleanError),
}
