use thiserror::Error;

use mcm_model::CellValue;

/// A cleaner received a value of a type it fundamentally cannot interpret.
///
/// This is a programming-contract violation, not dirty data: placeholder
/// text, malformed numbers and the like resolve to null per the cleaners'
/// documented policy and never produce an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CleanError {
    #[error("{target} cleaner cannot interpret a {found} value")]
    Coercion {
        target: &'static str,
        found: &'static str,
    },
}

impl CleanError {
    pub(crate) fn coercion(target: &'static str, value: &CellValue) -> Self {
        CleanError::Coercion {
            target,
            found: value.type_name(),
        }
    }
}
