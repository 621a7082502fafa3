//! Filtered projections of the canonical table and facet counts over them.

use std::collections::{HashMap, HashSet};

use brandex_core::{BrandRecord, CanonicalTable, Field};
use serde::Serialize;

use crate::predicate::FilterPredicate;

/// One row of a frequency summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Borrowed, ordered subset of a canonical table.
#[derive(Debug, Clone)]
pub struct BrandView<'a> {
    pub records: Vec<&'a BrandRecord>,
    /// Size of the table the view was taken from.
    pub total: usize,
}

impl<'a> BrandView<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a BrandRecord> + '_ {
        self.records.iter().copied()
    }

    #[must_use]
    pub fn count_by(&self, field: Field) -> Vec<FacetCount> {
        count_by(self.iter(), field)
    }

    /// The `n` most frequent values of `field`.
    #[must_use]
    pub fn top(&self, field: Field, n: usize) -> Vec<FacetCount> {
        let mut counts = self.count_by(field);
        counts.truncate(n);
        counts
    }
}

/// Records of `table` matching `predicate`, in table order.
#[must_use]
pub fn filter<'a>(table: &'a CanonicalTable, predicate: &FilterPredicate) -> BrandView<'a> {
    let records: Vec<&BrandRecord> = if predicate.is_unsatisfiable() {
        Vec::new()
    } else {
        table.iter().filter(|r| predicate.matches(r)).collect()
    };

    tracing::debug!(
        industries = predicate.industries.len(),
        regions = predicate.regions.len(),
        search = predicate.search(),
        matched = records.len(),
        total = table.len(),
        "filtered brand table"
    );

    BrandView {
        records,
        total: table.len(),
    }
}

/// Frequency of each present value of `field`, by descending count.
/// Ties keep first-seen order.
#[must_use]
pub fn count_by<'a, I>(records: I, field: Field) -> Vec<FacetCount>
where
    I: IntoIterator<Item = &'a BrandRecord>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<FacetCount> = Vec::new();

    for record in records {
        let Some(value) = record.get(field) else {
            continue;
        };
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(FacetCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Distinct present values of `field` in first-seen order.
#[must_use]
pub fn distinct_values(table: &CanonicalTable, field: Field) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .iter()
        .filter_map(|r| r.get(field))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
