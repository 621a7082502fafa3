use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::BrandRecord;

/// The reconciled, deduplicated brand table.
///
/// Immutable once built. A refresh produces a new table; readers holding the
/// old one keep a consistent view.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalTable {
    records: Vec<BrandRecord>,
    sources: Vec<String>,
    built_at: DateTime<Utc>,
}

impl CanonicalTable {
    /// Wrap already-reconciled records. `sources` names the inputs in
    /// precedence order.
    #[must_use]
    pub fn new(records: Vec<BrandRecord>, sources: Vec<String>) -> Self {
        Self {
            records,
            sources,
            built_at: Utc::now(),
        }
    }

    /// Rebuild a table read back from storage with its recorded provenance.
    #[must_use]
    pub fn restored(
        records: Vec<BrandRecord>,
        sources: Vec<String>,
        built_at: DateTime<Utc>,
    ) -> Self {
        Self {
            records,
            sources,
            built_at,
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<BrandRecord> {
        self.records
    }

    #[must_use]
    pub fn records(&self) -> &[BrandRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BrandRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[must_use]
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a BrandRecord;
    type IntoIter = std::slice::Iter<'a, BrandRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
