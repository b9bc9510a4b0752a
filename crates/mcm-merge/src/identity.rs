//! Pluggable identity resolution.
//!
//! Callers that upsert into an existing dataset look a record up by a
//! composite natural key before applying row data. Which columns form the
//! key is application-specific, so the hook is a trait plus a configurable
//! [`NaturalKey`] — nothing here hard-codes field names.

use std::collections::BTreeMap;

use mcm_clean::{Cleaner, default_cleaner};
use mcm_model::{CellValue, Row};

use crate::error::MappingError;

/// Outcome of identity resolution: the existing record, if any, and the
/// cleaned criteria that identified it.
#[derive(Debug, Clone)]
pub struct Resolution<R> {
    pub existing: Option<R>,
    pub criteria: BTreeMap<String, CellValue>,
}

/// The identity-resolution hook.
///
/// May perform I/O (a database lookup); any timeout/retry policy belongs to
/// the implementation, not the engine.
pub trait IdentityResolver<R> {
    fn resolve_identity(&self, row: &Row) -> Result<Resolution<R>, MappingError>;
}

impl<R, F> IdentityResolver<R> for F
where
    F: Fn(&Row) -> Result<Resolution<R>, MappingError>,
{
    fn resolve_identity(&self, row: &Row) -> Result<Resolution<R>, MappingError> {
        self(row)
    }
}

/// A composite natural key over raw column names.
#[derive(Debug, Clone)]
pub struct NaturalKey {
    columns: Vec<String>,
}

impl NaturalKey {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Extracts and cleans the key values from a row.
    ///
    /// Fails when a required column is absent, or when cleaning leaves no
    /// usable value — this guards against creating spurious records from
    /// malformed identity data.
    pub fn criteria(
        &self,
        row: &Row,
        cleaner: Option<&Cleaner<'_>>,
    ) -> Result<BTreeMap<String, CellValue>, MappingError> {
        let mut criteria = BTreeMap::new();
        for column in &self.columns {
            let raw = row
                .get(column)
                .ok_or_else(|| MappingError::MissingIdentity(column.clone()))?;
            let cleaned = match cleaner {
                Some(cleaner) => cleaner
                    .clean_value(raw.clone(), column)
                    .map_err(|_| MappingError::UnusableIdentity(column.clone()))?,
                None => default_cleaner(raw.clone()),
            };
            if cleaned.is_blank() {
                return Err(MappingError::UnusableIdentity(column.clone()));
            }
            criteria.insert(column.clone(), cleaned);
        }
        Ok(criteria)
    }
}

/// [`IdentityResolver`] backed by a [`NaturalKey`] and a caller-supplied
/// lookup over the cleaned criteria.
pub struct NaturalKeyResolver<'c, R, F>
where
    F: Fn(&BTreeMap<String, CellValue>) -> Option<R>,
{
    key: NaturalKey,
    cleaner: Option<&'c Cleaner<'c>>,
    lookup: F,
}

impl<'c, R, F> NaturalKeyResolver<'c, R, F>
where
    F: Fn(&BTreeMap<String, CellValue>) -> Option<R>,
{
    pub fn new(key: NaturalKey, cleaner: Option<&'c Cleaner<'c>>, lookup: F) -> Self {
        Self { key, cleaner, lookup }
    }
}

impl<'c, R, F> IdentityResolver<R> for NaturalKeyResolver<'c, R, F>
where
    F: Fn(&BTreeMap<String, CellValue>) -> Option<R>,
{
    fn resolve_identity(&self, row: &Row) -> Result<Resolution<R>, MappingError> {
        let criteria = self.key.criteria(row, self.cleaner)?;
        let existing = (self.lookup)(&criteria);
        Ok(Resolution { existing, criteria })
    }
}
