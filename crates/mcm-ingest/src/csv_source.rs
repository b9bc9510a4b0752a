//! CSV collaborator: ordered string-keyed rows with stable column names.
//!
//! The engine core never reads files; it consumes a [`RowSource`]. This
//! module provides the reference implementation over the `csv` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use mcm_model::{CellValue, Row};

use crate::error::IngestError;

/// Superscript escape characters some feeds emit for units like "ft²";
/// both render as a plain `2` in headers.
const SUPERSCRIPT_ESCAPES: [char; 2] = ['\u{fffd}', '\u{b2}'];

/// A source of ordered, string-keyed rows.
///
/// Column names are exposed once, before the first row, and stay stable for
/// the lifetime of one parse session.
pub trait RowSource {
    fn columns(&self) -> &[String];

    /// Next row, `None` at end of input.
    fn next_row(&mut self) -> Option<Result<Row, IngestError>>;
}

/// [`RowSource`] over a CSV stream.
///
/// Headers are cleaned on open: BOM stripped, whitespace runs collapsed,
/// superscript escapes replaced. Empty cells are yielded as `Null`,
/// everything else as trimmed `Text`.
pub struct CsvRowSource<R: Read> {
    reader: csv::Reader<R>,
    columns: Vec<String>,
}

impl<R: Read> CsvRowSource<R> {
    pub fn new(input: R) -> Result<Self, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let columns: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        debug!(columns = columns.len(), "csv source ready");
        Ok(Self { reader, columns })
    }

    /// Drains the source into memory; useful ahead of chunked processing.
    pub fn read_all(&mut self) -> Result<Vec<Row>, IngestError> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row() {
            rows.push(row?);
        }
        debug!(rows = rows.len(), "csv source drained");
        Ok(rows)
    }
}

impl CsvRowSource<File> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        Self::new(File::open(path.as_ref())?)
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> Option<Result<Row, IngestError>> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Err(err) => Some(Err(err.into())),
            Ok(false) => None,
            Ok(true) => {
                let mut row = Row::new();
                for (idx, column) in self.columns.iter().enumerate() {
                    let cell = record.get(idx).unwrap_or("").trim();
                    if cell.is_empty() {
                        row.push(column.clone(), CellValue::Null);
                    } else {
                        row.push(column.clone(), cell);
                    }
                }
                Some(Ok(row))
            }
        }
    }
}

fn clean_header(raw: &str) -> String {
    let replaced: String = raw
        .trim_matches('\u{feff}')
        .chars()
        .map(|ch| {
            if SUPERSCRIPT_ESCAPES.contains(&ch) {
                '2'
            } else {
                ch
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_headers() {
        assert_eq!(clean_header("\u{feff}Property Id"), "Property Id");
        assert_eq!(clean_header("Gross Floor Area (ft\u{b2})"), "Gross Floor Area (ft2)");
        assert_eq!(clean_header("Gross Floor Area (ft\u{fffd})"), "Gross Floor Area (ft2)");
        assert_eq!(clean_header("  Year   Ending "), "Year Ending");
    }
}
