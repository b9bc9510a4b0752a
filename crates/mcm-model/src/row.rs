//! Ordered string-keyed rows as yielded by a tabular source.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// One parsed row: raw column names paired with raw cell values, in the
/// source file's native column order.
///
/// Column names are *raw* — exactly as found in the source, not yet mapped
/// to canonical fields. Duplicate names are tolerated (`get` returns the
/// first occurrence).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>, V: Into<CellValue>> FromIterator<(S, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_source_order() {
        let row: Row = [("Address", "1 Main St"), ("Name", "HQ"), ("City", "Gotham")]
            .into_iter()
            .collect();
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["Address", "Name", "City"]);
        assert_eq!(row.get("City"), Some(&CellValue::Text("Gotham".to_string())));
        assert_eq!(row.get("Nope"), None);
    }

    #[test]
    fn duplicate_columns_resolve_to_first() {
        let mut row = Row::new();
        row.push("Value", "a");
        row.push("Value", "b");
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Value"), Some(&CellValue::Text("a".to_string())));
    }
}
