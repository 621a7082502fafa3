//! Queries over tables produced by the reconciler rather than built by hand.

use brandex_core::Field;
use brandex_query::{
    count_by, distinct_values, filter, find_brand, Catalog, FilterPredicate, QueryError,
};
use brandex_reconcile::{reconcile, SourceTable};

fn source(name: &str, headers: &[&str], rows: &[&[&str]]) -> SourceTable {
    SourceTable::new(
        name,
        headers.iter().map(|h| (*h).to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    )
}

fn acme_sources() -> Vec<SourceTable> {
    vec![
        source(
            "s1",
            &["brand_name", "industry", "parent_company"],
            &[&["Acme", "Auto", "AcmeCo"]],
        ),
        source(
            "s2",
            &["brand_name", "industry", "website"],
            &[&["Acme", "Auto", "acme.com"]],
        ),
    ]
}

#[test]
fn acme_with_empty_region_selection_is_empty() {
    let reconciled = reconcile(&acme_sources()).unwrap();
    let table = &reconciled.table;
    assert_eq!(table.len(), 1);

    let pred = FilterPredicate::new(["Auto"], Vec::<String>::new()).with_search("");
    assert!(filter(table, &pred).is_empty());
}

#[test]
fn acme_without_region_never_matches_region_facet() {
    let reconciled = reconcile(&acme_sources()).unwrap();
    let table = &reconciled.table;

    // select_all has no region to pick, so the region selection is empty.
    let pred = FilterPredicate::select_all(table);
    assert!(pred.regions.is_empty());
    assert!(filter(table, &pred).is_empty());

    let acme = find_brand(table, "Acme").unwrap();
    assert_eq!(acme.parent_company.as_deref(), Some("AcmeCo"));
    assert_eq!(acme.website.as_deref(), Some("acme.com"));
}

#[test]
fn facets_and_counts_over_partial_rows() {
    let sources = vec![
        source(
            "brand_list",
            &["Brand", "Industry", "Region"],
            &[
                &["Tata Motors", "Automotive", "India"],
                &["Infosys", "IT Services", "N/A"],
                &["Wipro", "IT Services", "India"],
            ],
        ),
        source(
            "extra",
            &["Brand", "Industry", "Region"],
            &[
                &["Infosys", "IT Services", "India"],
                &["Mahindra", "Automotive", "India"],
                &["Zomato", "", "India"],
            ],
        ),
    ];
    let reconciled = reconcile(&sources).unwrap();
    let table = &reconciled.table;

    assert_eq!(
        distinct_values(table, Field::Industry),
        vec!["Automotive", "IT Services"]
    );

    let counts = count_by(table, Field::Industry);
    assert_eq!(counts[0].value, "Automotive");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].value, "IT Services");
    assert_eq!(counts[1].count, 2);

    // Infosys got its region from the second source; Zomato has no industry.
    let view = filter(table, &FilterPredicate::select_all(table));
    let names: Vec<&str> = view.iter().map(|r| r.brand_name.as_str()).collect();
    assert_eq!(names, vec!["Tata Motors", "Infosys", "Wipro", "Mahindra"]);
    assert_eq!(view.total, 5);
}

#[test]
fn catalog_reload_from_reconciler() {
    let catalog = Catalog::new(reconcile(&acme_sources()).unwrap().table);
    let old = catalog.snapshot();

    let failed = catalog.reload(|| {
        reconcile(&[source("broken", &["brand_name"], &[&["Acme"]])]).map(|r| r.table)
    });
    assert!(failed.is_err());
    assert!(std::sync::Arc::ptr_eq(&old, &catalog.snapshot()));

    let mut sources = acme_sources();
    sources.push(source(
        "s3",
        &["brand_name", "industry"],
        &[&["Bolt", "Auto"]],
    ));
    catalog
        .reload(|| reconcile(&sources).map(|r| r.table))
        .unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(catalog.snapshot().len(), 2);

    let err = find_brand(&catalog.snapshot(), "Nope").unwrap_err();
    assert!(matches!(err, QueryError::NotFound { .. }));
}
