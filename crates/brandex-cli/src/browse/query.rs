use anyhow::Context;
use brandex_core::{CanonicalTable, Field};
use brandex_query::{count_by, distinct_values, filter, find_brand, find_brand_strict};

use super::FilterArgs;
use crate::render;

/// Print the brands matching `args`, as a table or as JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_list(
    table: &CanonicalTable,
    args: &FilterArgs,
    json: bool,
) -> anyhow::Result<()> {
    let predicate = args.predicate(table);
    let view = filter(table, &predicate);

    if json {
        println!("{}", serde_json::to_string_pretty(&view.records)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("no brands match the current filters");
        return Ok(());
    }
    print!("{}", render::brand_table(view.iter()));
    println!();
    println!("{} of {} brands", view.len(), view.total);
    Ok(())
}

/// Print value counts of `by` over the filtered brands, most frequent first.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_counts(
    table: &CanonicalTable,
    args: &FilterArgs,
    by: Field,
    top: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let predicate = args.predicate(table);
    let view = filter(table, &predicate);
    let counts = match top {
        Some(n) => view.top(by, n),
        None => view.count_by(by),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }
    if counts.is_empty() {
        println!("no {by} values in the current selection");
        return Ok(());
    }
    print!("{}", render::counts_table(by, &counts));
    Ok(())
}

/// Print one brand in detail.
///
/// # Errors
///
/// Returns an error if the brand is not found, or if `strict` and the name
/// matches more than one record.
pub(crate) fn run_show(
    table: &CanonicalTable,
    brand: &str,
    strict: bool,
    json: bool,
) -> anyhow::Result<()> {
    let record = if strict {
        find_brand_strict(table, brand)
    } else {
        find_brand(table, brand)
    }
    .with_context(|| format!("lookup of '{brand}' failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", render::brand_detail(record));
    }
    Ok(())
}

/// Print the distinct values of `field`, one per line.
pub(crate) fn run_facets(table: &CanonicalTable, field: Field) {
    for value in distinct_values(table, field) {
        println!("{value}");
    }
}

/// Headline numbers for the whole table.
pub(crate) fn run_overview(table: &CanonicalTable) {
    let industries = count_by(table, Field::Industry);
    println!("Total brands:  {}", table.len());
    println!("Industries:    {}", industries.len());
    println!("Regions:       {}", distinct_values(table, Field::Region).len());
    println!(
        "Sources:       {}",
        if table.sources().is_empty() {
            render::MISSING.to_string()
        } else {
            table.sources().join(", ")
        }
    );
    if let Some(largest) = industries.first() {
        println!("Top industry:  {} ({})", largest.value, largest.count);
    }
}
