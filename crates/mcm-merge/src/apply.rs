//! Application of mapped row data to destination records.

use std::collections::BTreeMap;

use mcm_clean::{Cleaner, default_cleaner};
use mcm_model::{CellValue, DestRecord, Row};

use crate::error::MergeError;
use crate::identity::IdentityResolver;

/// Confirmed raw-column → destination-field mapping, as produced by
/// `ColumnMapping::row_mapping`.
pub type RowMapping = BTreeMap<String, String>;

/// Applies one row of raw values to a fresh record from `factory`.
///
/// Every raw column lands in exactly one place: the mapped destination
/// attribute when the column appears in `mapping`, the record's side-bag
/// otherwise. Nothing is silently dropped.
///
/// `initial` seeds baseline state (for example a pre-known classification)
/// *before* any row column is applied, so row data can only override it
/// through the normal mapping path.
pub fn apply_row<R, F>(
    row: &Row,
    mapping: &RowMapping,
    factory: F,
    cleaner: Option<&Cleaner<'_>>,
    initial: Option<&BTreeMap<String, CellValue>>,
) -> Result<R, MergeError>
where
    R: DestRecord,
    F: FnOnce() -> R,
{
    let mut record = factory();
    apply_into(&mut record, row, mapping, cleaner, initial)?;
    Ok(record)
}

/// Applies row data onto an existing record; see [`apply_row`].
pub fn apply_into<R: DestRecord>(
    record: &mut R,
    row: &Row,
    mapping: &RowMapping,
    cleaner: Option<&Cleaner<'_>>,
    initial: Option<&BTreeMap<String, CellValue>>,
) -> Result<(), MergeError> {
    if let Some(initial) = initial {
        for (field, value) in initial {
            if !record.try_set(field, value.clone()) {
                record.merge_extra(field, value.clone());
            }
        }
    }

    for (column, raw_value) in row.iter() {
        let cleaned = match cleaner {
            Some(cleaner) => {
                let lookup = effective_lookup_name(column, mapping, cleaner);
                cleaner.clean_value(raw_value.clone(), lookup)?
            }
            None => default_cleaner(raw_value.clone()),
        };
        match mapping.get(column) {
            Some(dest_field) => {
                // A mapped field the record does not expose still has to be
                // accounted for; it falls back to the side-bag under the raw
                // column name.
                if !record.try_set(dest_field, cleaned.clone()) {
                    record.merge_extra(column, cleaned);
                }
            }
            None => record.merge_extra(column, cleaned),
        }
    }

    Ok(())
}

/// Merges one row with get-or-create identity semantics: the resolver's
/// existing record is reused when found, otherwise `factory` runs.
pub fn merge_row<R, F>(
    row: &Row,
    mapping: &RowMapping,
    resolver: &dyn IdentityResolver<R>,
    factory: F,
    cleaner: Option<&Cleaner<'_>>,
    initial: Option<&BTreeMap<String, CellValue>>,
) -> Result<R, MergeError>
where
    R: DestRecord,
    F: FnOnce() -> R,
{
    let resolution = resolver.resolve_identity(row)?;
    let mut record = resolution.existing.unwrap_or_else(factory);
    apply_into(&mut record, row, mapping, cleaner, initial)?;
    Ok(record)
}

/// Field name a cell is cleaned under.
///
/// Specially-typed (float/date) raw columns clean under their own name;
/// everything else cleans under its mapped destination name, so columns
/// mapped at run time still receive the destination type's coercion.
fn effective_lookup_name<'a>(
    column: &'a str,
    mapping: &'a RowMapping,
    cleaner: &Cleaner<'_>,
) -> &'a str {
    if cleaner.is_typed_field(column) {
        column
    } else {
        mapping.get(column).map_or(column, String::as_str)
    }
}
