//! Outer-join merge of source tables into the canonical table.
//!
//! Sources are given in precedence order. For each `(brand_name, industry)`
//! key the first row seen defines the record; every later row, from the same
//! source or a later one, only fills fields that are still absent.

use std::collections::HashMap;

use brandex_core::{BrandRecord, CanonicalTable, JoinKey};

use crate::error::ReconcileError;
use crate::source::SourceTable;

/// Per-source merge counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub source_name: String,
    pub rows_read: usize,
    /// Rows dropped because `brand_name` was absent.
    pub rows_skipped: usize,
    /// Rows that introduced a new key.
    pub records_created: usize,
    /// Rows that collapsed into an existing key.
    pub records_merged: usize,
    pub fields_filled: usize,
    /// Later values discarded because an earlier one was already set.
    pub conflicts_discarded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub sources: Vec<SourceStats>,
    pub total_records: usize,
}

impl ReconcileReport {
    #[must_use]
    pub fn rows_skipped(&self) -> usize {
        self.sources.iter().map(|s| s.rows_skipped).sum()
    }

    #[must_use]
    pub fn conflicts_discarded(&self) -> usize {
        self.sources.iter().map(|s| s.conflicts_discarded).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub table: CanonicalTable,
    pub report: ReconcileReport,
}

/// Check every source has the join-key columns.
///
/// # Errors
///
/// Returns [`ReconcileError::Schema`] for the first source missing any.
pub fn check_schemas(sources: &[SourceTable]) -> Result<(), ReconcileError> {
    for source in sources {
        let missing = source.missing_key_fields();
        if !missing.is_empty() {
            return Err(ReconcileError::Schema {
                source_name: source.name.clone(),
                missing: missing.iter().map(|f| f.as_str().to_string()).collect(),
            });
        }
    }
    Ok(())
}

/// Merge `sources` into one canonical table.
///
/// Pure function of its inputs; persisting the result is the caller's job.
///
/// # Errors
///
/// Returns [`ReconcileError::Schema`] if any source lacks a join-key column.
/// No merging happens in that case.
pub fn reconcile(sources: &[SourceTable]) -> Result<Reconciled, ReconcileError> {
    check_schemas(sources)?;

    let mut records: Vec<BrandRecord> = Vec::new();
    let mut index: HashMap<JoinKey, usize> = HashMap::new();
    let mut report = ReconcileReport::default();

    for source in sources {
        let resolved = source.resolved_columns();
        let ignored = source.ignored_headers();
        if !ignored.is_empty() {
            tracing::debug!(source = %source.name, ?ignored, "ignoring unmapped columns");
        }

        let mut stats = SourceStats {
            source_name: source.name.clone(),
            ..SourceStats::default()
        };

        for (row_idx, row) in source.rows.iter().enumerate() {
            stats.rows_read += 1;
            let Some(record) = SourceTable::record_from_row(&resolved, row) else {
                stats.rows_skipped += 1;
                tracing::warn!(
                    source = %source.name,
                    row = row_idx + 1,
                    "skipping row without brand_name"
                );
                continue;
            };

            let key = record.join_key();
            if let Some(&pos) = index.get(&key) {
                let outcome = records[pos].fill_from(&record);
                stats.records_merged += 1;
                stats.fields_filled += outcome.filled;
                stats.conflicts_discarded += outcome.conflicts;
            } else {
                index.insert(key, records.len());
                records.push(record);
                stats.records_created += 1;
            }
        }

        tracing::debug!(
            source = %stats.source_name,
            rows_read = stats.rows_read,
            rows_skipped = stats.rows_skipped,
            created = stats.records_created,
            merged = stats.records_merged,
            "source merged"
        );
        report.sources.push(stats);
    }

    report.total_records = records.len();
    tracing::info!(
        sources = sources.len(),
        records = report.total_records,
        skipped = report.rows_skipped(),
        conflicts = report.conflicts_discarded(),
        "reconciliation complete"
    );

    let names = sources.iter().map(|s| s.name.clone()).collect();
    Ok(Reconciled {
        table: CanonicalTable::new(records, names),
        report,
    })
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
