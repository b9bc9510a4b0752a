//! Column mapping types: per-field suggestions and the confirmed mapping
//! consumed by row application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One destination field's correspondence: the chosen raw column plus a
/// confidence score on the 0–100 scale.
///
/// `column: None` with confidence 0 means "no confident match found";
/// `column: None` with a positive confidence is a *confirmed* "no mapping"
/// decision (typically from a previous-mapping oracle) and must be carried
/// as-is, not retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatch {
    pub column: Option<String>,
    pub confidence: u8,
}

impl ColumnMatch {
    pub fn new(column: impl Into<String>, confidence: u8) -> Self {
        Self {
            column: Some(column.into()),
            confidence,
        }
    }

    /// No confident match found.
    pub fn unmapped() -> Self {
        Self {
            column: None,
            confidence: 0,
        }
    }

    /// A confirmed "this field has no source column" decision.
    pub fn confirmed_none(confidence: u8) -> Self {
        Self {
            column: None,
            confidence,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.column.is_some()
    }
}

/// A full mapping: every destination field to its [`ColumnMatch`].
///
/// Produced as a suggestion by the column mapper, then confirmed or edited
/// by a human reviewer before rows are applied. Entries are kept sorted by
/// destination field so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub entries: BTreeMap<String, ColumnMatch>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dest_field: impl Into<String>, entry: ColumnMatch) {
        self.entries.insert(dest_field.into(), entry);
    }

    pub fn get(&self, dest_field: &str) -> Option<&ColumnMatch> {
        self.entries.get(dest_field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMatch)> {
        self.entries.iter().map(|(field, entry)| (field.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.is_mapped()).count()
    }

    pub fn unmapped_count(&self) -> usize {
        self.len() - self.mapped_count()
    }

    /// Mean confidence across all entries, if any.
    pub fn mean_confidence(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: u32 = self.entries.values().map(|entry| u32::from(entry.confidence)).sum();
        Some(f64::from(sum) / self.entries.len() as f64)
    }

    /// The raw-column → destination-field view used when applying rows.
    ///
    /// Unmapped entries are skipped. Should two destination fields claim the
    /// same raw column (possible in an unreviewed suggestion), the
    /// lexicographically later destination wins; a reviewer is expected to
    /// resolve such duplicates before application.
    pub fn row_mapping(&self) -> BTreeMap<String, String> {
        let mut mapping = BTreeMap::new();
        for (dest_field, entry) in &self.entries {
            if let Some(column) = &entry.column {
                mapping.insert(column.clone(), dest_field.clone());
            }
        }
        mapping
    }
}

impl FromIterator<(String, ColumnMatch)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (String, ColumnMatch)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
