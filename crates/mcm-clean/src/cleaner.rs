//! Schema-bound value cleaning.

use std::collections::BTreeSet;

use tracing::debug;

use mcm_model::{CellValue, FieldType, Schema};

use crate::cleaners::{date_cleaner, default_cleaner, float_cleaner};
use crate::error::CleanError;

/// Cleans values for one destination schema.
///
/// Bound to a borrowed, immutable [`Schema`] at construction; the float- and
/// date-typed field subsets are derived once and cached. `clean_value` is a
/// pure function from then on.
#[derive(Debug, Clone)]
pub struct Cleaner<'a> {
    schema: &'a Schema,
    float_fields: BTreeSet<String>,
    date_fields: BTreeSet<String>,
}

impl<'a> Cleaner<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        let float_fields: BTreeSet<String> = schema
            .fields_of_type(FieldType::Float)
            .map(str::to_string)
            .collect();
        let date_fields: BTreeSet<String> = schema
            .fields_of_type(FieldType::Date)
            .map(str::to_string)
            .collect();
        debug!(
            floats = float_fields.len(),
            dates = date_fields.len(),
            "cleaner bound to schema"
        );
        Self {
            schema,
            float_fields,
            date_fields,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Whether a field receives specially-typed (float/date) coercion.
    pub fn is_typed_field(&self, field: &str) -> bool {
        self.float_fields.contains(field) || self.date_fields.contains(field)
    }

    /// Cleans a value based on the characteristics of its field.
    ///
    /// The default cleaner always runs first (none-synonym detection); the
    /// field's declared type then routes to the float or date cleaner. All
    /// other types pass the default-cleaned value through unchanged.
    pub fn clean_value(&self, value: CellValue, field: &str) -> Result<CellValue, CleanError> {
        let value = default_cleaner(value);
        if self.float_fields.contains(field) {
            return Ok(float_cleaner(&value)?.into());
        }
        if self.date_fields.contains(field) {
            return Ok(date_cleaner(&value).into());
        }
        Ok(value)
    }
}
