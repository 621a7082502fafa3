//! Read-only browsing commands over the canonical table.
//!
//! Facets the user does not narrow default to every value present in the
//! table, matching the dashboards' select-all multiselects. `--no-industries`
//! and `--no-regions` select nothing, which yields an empty result.

mod query;

use brandex_core::{CanonicalTable, Field};
use brandex_query::{distinct_values, FilterPredicate};
use clap::Args;

pub(crate) use query::{run_counts, run_facets, run_list, run_overview, run_show};

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Industry to include (repeatable; default: all)
    #[arg(long = "industry", value_name = "INDUSTRY")]
    pub industries: Vec<String>,
    /// Region to include (repeatable; default: all)
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,
    /// Case-insensitive substring of the brand name
    #[arg(long)]
    pub search: Option<String>,
    /// Select no industries
    #[arg(long, conflicts_with = "industries")]
    pub no_industries: bool,
    /// Select no regions
    #[arg(long, conflicts_with = "regions")]
    pub no_regions: bool,
}

impl FilterArgs {
    pub(crate) fn predicate(&self, table: &CanonicalTable) -> FilterPredicate {
        let industries =
            facet_selection(table, Field::Industry, &self.industries, self.no_industries);
        let regions = facet_selection(table, Field::Region, &self.regions, self.no_regions);
        FilterPredicate::new(industries, regions)
            .with_search(self.search.as_deref().unwrap_or_default())
    }
}

fn facet_selection(
    table: &CanonicalTable,
    field: Field,
    chosen: &[String],
    none: bool,
) -> Vec<String> {
    if none {
        Vec::new()
    } else if chosen.is_empty() {
        distinct_values(table, field)
    } else {
        chosen.to_vec()
    }
}
