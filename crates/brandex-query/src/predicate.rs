use std::collections::BTreeSet;

use brandex_core::{BrandRecord, CanonicalTable, Field};

use crate::view::distinct_values;

/// Conjunction of industry membership, region membership, and a
/// case-insensitive substring search on the brand name.
///
/// An empty industry or region selection matches nothing. Callers that want
/// "no filter" on a facet pre-select every value with [`FilterPredicate::select_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    pub industries: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    search: String,
    search_folded: String,
}

impl FilterPredicate {
    #[must_use]
    pub fn new<I, R, S1, S2>(industries: I, regions: R) -> Self
    where
        I: IntoIterator<Item = S1>,
        R: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            industries: industries.into_iter().map(Into::into).collect(),
            regions: regions.into_iter().map(Into::into).collect(),
            search: String::new(),
            search_folded: String::new(),
        }
    }

    /// Every distinct industry and region in `table` selected, no search.
    #[must_use]
    pub fn select_all(table: &CanonicalTable) -> Self {
        Self::new(
            distinct_values(table, Field::Industry),
            distinct_values(table, Field::Region),
        )
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self.search_folded = self.search.to_lowercase();
        self
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// True when some facet selection is empty, so no record can match.
    #[must_use]
    pub fn is_unsatisfiable(&self) -> bool {
        self.industries.is_empty() || self.regions.is_empty()
    }

    #[must_use]
    pub fn matches(&self, record: &BrandRecord) -> bool {
        let in_set = |set: &BTreeSet<String>, value: Option<&String>| {
            value.is_some_and(|v| set.contains(v))
        };

        in_set(&self.industries, record.industry.as_ref())
            && in_set(&self.regions, record.region.as_ref())
            && (self.search_folded.is_empty()
                || record.brand_name.to_lowercase().contains(&self.search_folded))
    }
}
