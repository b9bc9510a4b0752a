//! Destination record capability interface.
//!
//! The engine never reflects over consumer models. An output record only has
//! to answer two things: "do you expose this named field?" (`try_set`) and
//! "take this unmapped value into your side-bag" (`merge_extra`).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::ModelError;
use crate::schema::Schema;

/// Capability trait implemented by output records.
pub trait DestRecord {
    /// Sets a named field if the record exposes it, returning whether it does.
    fn try_set(&mut self, field: &str, value: CellValue) -> bool;

    /// Folds an unmapped value into the record's side-bag under the raw
    /// column name.
    fn merge_extra(&mut self, field: &str, value: CellValue);
}

/// In-memory [`DestRecord`] with a declared field set and a side-bag.
///
/// Useful on its own for staging output before persistence, and as the test
/// double for consumer-provided models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericRecord {
    known: BTreeSet<String>,
    pub fields: BTreeMap<String, CellValue>,
    pub extra: BTreeMap<String, CellValue>,
}

impl GenericRecord {
    /// A record exposing the given named fields.
    pub fn with_fields(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            known: names.into_iter().map(Into::into).collect(),
            fields: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// A record exposing one named field per schema entry.
    pub fn for_schema(schema: &Schema) -> Self {
        Self::with_fields(schema.field_names())
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    pub fn exposes(&self, field: &str) -> bool {
        self.known.contains(field)
    }

    /// Replaces the side-bag from its serialized-text form.
    ///
    /// Adapter-boundary hook for persistence layers whose side-bag
    /// round-trips through a JSON string; the core engine only ever sees the
    /// structured container.
    pub fn extra_from_json(&mut self, text: &str) -> Result<(), ModelError> {
        self.extra = serde_json::from_str(text).map_err(ModelError::ExtraData)?;
        Ok(())
    }

    pub fn extra_to_json(&self) -> Result<String, ModelError> {
        serde_json::to_string(&self.extra).map_err(ModelError::ExtraData)
    }
}

impl DestRecord for GenericRecord {
    fn try_set(&mut self, field: &str, value: CellValue) -> bool {
        if self.known.contains(field) {
            self.fields.insert(field.to_string(), value);
            true
        } else {
            false
        }
    }

    fn merge_extra(&mut self, field: &str, value: CellValue) {
        self.extra.insert(field.to_string(), value);
    }
}
