//! Chunked, parallel row processing.
//!
//! Row application has no cross-row memory, so rows partition into
//! fixed-size chunks and each chunk dispatches to a worker with no locking.
//! Cancellation is cooperative: the flag is observed once per chunk, and a
//! chunk that starts always finishes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::ParallelSlice;
use rayon::iter::ParallelIterator;
use tracing::debug;

use mcm_clean::Cleaner;
use mcm_model::{CellValue, DestRecord, Row};

use crate::apply::{RowMapping, apply_row};
use crate::error::MergeError;

/// Per-row result of a batch run.
#[derive(Debug)]
pub enum RowOutcome<R> {
    /// The row was applied.
    Applied(R),
    /// The row failed; the batch carries on.
    Failed(MergeError),
    /// The row's chunk was never started because the batch was cancelled.
    Skipped,
}

impl<R> RowOutcome<R> {
    pub fn applied(self) -> Option<R> {
        match self {
            RowOutcome::Applied(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RowOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RowOutcome::Skipped)
    }
}

/// Partitions rows into fixed-size chunks. A `size` of zero is treated as 1.
pub fn chunk_rows(rows: &[Row], size: usize) -> impl Iterator<Item = &[Row]> {
    rows.chunks(size.max(1))
}

/// Runs `process` over every row, chunked and in parallel.
///
/// Outcomes come back in row order, one per input row; a failing row never
/// aborts its batch. Chunks that begin after `cancel` flips are skipped
/// whole.
pub fn process_chunked<R, P>(
    rows: &[Row],
    chunk_size: usize,
    cancel: &AtomicBool,
    process: P,
) -> Vec<RowOutcome<R>>
where
    R: Send,
    P: Fn(&Row) -> Result<R, MergeError> + Sync,
{
    let chunk_size = chunk_size.max(1);
    debug!(
        rows = rows.len(),
        chunk_size,
        chunks = rows.len().div_ceil(chunk_size),
        "processing batch"
    );

    rows.par_chunks(chunk_size)
        .flat_map_iter(|chunk| {
            if cancel.load(Ordering::Relaxed) {
                chunk.iter().map(|_| RowOutcome::Skipped).collect::<Vec<_>>()
            } else {
                chunk
                    .iter()
                    .map(|row| match process(row) {
                        Ok(record) => RowOutcome::Applied(record),
                        Err(err) => RowOutcome::Failed(err),
                    })
                    .collect()
            }
        })
        .collect()
}

/// Convenience wrapper: [`apply_row`] over every row, chunked and parallel.
pub fn apply_chunked<R, F>(
    rows: &[Row],
    chunk_size: usize,
    mapping: &RowMapping,
    factory: F,
    cleaner: Option<&Cleaner<'_>>,
    initial: Option<&BTreeMap<String, CellValue>>,
    cancel: &AtomicBool,
) -> Vec<RowOutcome<R>>
where
    R: DestRecord + Send,
    F: Fn() -> R + Sync,
{
    process_chunked(rows, chunk_size, cancel, |row| {
        apply_row(row, mapping, &factory, cleaner, initial)
    })
}
