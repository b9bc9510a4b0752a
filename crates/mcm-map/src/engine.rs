//! Column mapping suggestion builder.
//!
//! For each destination field the engine picks a single raw-column
//! correspondence with a confidence score, consulting a caller-supplied
//! previous-mapping oracle before falling back to fuzzy matching. The result
//! covers every destination field and is a *suggestion*: a human confirms or
//! edits it before any row is applied.

use tracing::{debug, warn};

use mcm_model::{ColumnMapping, ColumnMatch};

use crate::error::MatchError;
use crate::matcher;

/// Oracle over previously confirmed mapping decisions.
///
/// `lookup` is called once per destination field. A `Some` result is
/// accepted outright — including `ColumnMatch { column: None, .. }`, a
/// confirmed "this field has no source column" decision. Confidence is on
/// the 0–100 integer scale; the oracle itself must satisfy that contract,
/// the engine never rescales.
pub trait PreviousMapping {
    fn lookup(&self, dest_field: &str) -> Option<ColumnMatch>;
}

impl<F> PreviousMapping for F
where
    F: Fn(&str) -> Option<ColumnMatch>,
{
    fn lookup(&self, dest_field: &str) -> Option<ColumnMatch> {
        self(dest_field)
    }
}

/// A confirmed mapping replays as an oracle for later imports of the feed.
impl PreviousMapping for ColumnMapping {
    fn lookup(&self, dest_field: &str) -> Option<ColumnMatch> {
        self.get(dest_field).cloned()
    }
}

/// Builds the raw-column → destination-field correspondence.
///
/// Per destination field: a previous-mapping result short-circuits fuzzy
/// matching; otherwise the top fuzzy match against `raw_columns` is accepted
/// when its score strictly exceeds `threshold`, else the field is left
/// unmapped with confidence 0.
///
/// Deterministic for fixed inputs: ranking is stable, with ties resolved by
/// the raw columns' original order.
pub fn build_column_mapping<S: AsRef<str>, D: AsRef<str>>(
    raw_columns: &[S],
    dest_fields: &[D],
    previous: Option<&dyn PreviousMapping>,
    threshold: u8,
) -> ColumnMapping {
    if raw_columns.is_empty() {
        warn!("no raw columns to map against; every destination field will be unmapped");
    }

    let mut mapping = ColumnMapping::new();
    for dest_field in dest_fields {
        let dest_field = dest_field.as_ref();
        if let Some(previous) = previous
            && let Some(entry) = previous.lookup(dest_field)
        {
            mapping.insert(dest_field, entry);
            continue;
        }
        mapping.insert(dest_field, best_fuzzy_entry(dest_field, raw_columns, threshold));
    }

    debug!(
        fields = mapping.len(),
        mapped = mapping.mapped_count(),
        "built column mapping suggestion"
    );
    mapping
}

fn best_fuzzy_entry<S: AsRef<str>>(dest_field: &str, raw_columns: &[S], threshold: u8) -> ColumnMatch {
    match matcher::rank(dest_field, raw_columns, 1) {
        Ok(ranked) => {
            let (column, score) = ranked[0];
            if score > threshold {
                ColumnMatch::new(column, score)
            } else {
                ColumnMatch::unmapped()
            }
        }
        Err(MatchError::EmptyCandidateSet) => ColumnMatch::unmapped(),
    }
}
