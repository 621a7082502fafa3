//! Plain-text rendering of query results. Absent values print as `N/A`.

use brandex_core::{BrandRecord, Field, SocialPlatform};
use brandex_query::FacetCount;
use brandex_reconcile::ReconcileReport;

pub(crate) const MISSING: &str = "N/A";

const NAME_WIDTH: usize = 26;
const INDUSTRY_WIDTH: usize = 28;
const REGION_WIDTH: usize = 12;

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

/// Cut `s` to `max` characters, marking the cut with `...`.
fn clip(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}

pub(crate) fn brand_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a BrandRecord>,
{
    let mut out = format!(
        "{:<NAME_WIDTH$}{:<INDUSTRY_WIDTH$}{:<REGION_WIDTH$}PARENT COMPANY\n",
        "BRAND", "INDUSTRY", "REGION"
    );
    for record in records {
        out.push_str(&format!(
            "{:<NAME_WIDTH$}{:<INDUSTRY_WIDTH$}{:<REGION_WIDTH$}{}\n",
            clip(&record.brand_name, NAME_WIDTH - 2),
            clip(or_missing(record.industry.as_deref()), INDUSTRY_WIDTH - 2),
            clip(or_missing(record.region.as_deref()), REGION_WIDTH - 2),
            or_missing(record.parent_company.as_deref())
        ));
    }
    out
}

pub(crate) fn counts_table(field: Field, counts: &[FacetCount]) -> String {
    let width = counts
        .iter()
        .map(|c| c.value.chars().count())
        .chain(std::iter::once(field.as_str().len()))
        .max()
        .unwrap_or_default()
        + 2;
    let mut out = format!("{:<width$}COUNT\n", field.as_str().to_uppercase());
    for c in counts {
        out.push_str(&format!("{:<width$}{}\n", c.value, c.count));
    }
    out
}

/// Bulleted list, or a single `N/A` line when empty.
fn bullets(out: &mut String, items: &[&str]) {
    if items.is_empty() {
        out.push_str(&format!("  {MISSING}\n"));
    }
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// Detail view of one brand: overview, social links, campaigns, endorsements.
pub(crate) fn brand_detail(record: &BrandRecord) -> String {
    let mut out = format!("{}\n\n", record.brand_name);
    for (label, field) in [
        ("Industry", Field::Industry),
        ("Region", Field::Region),
        ("Parent Company", Field::ParentCompany),
        ("Website", Field::Website),
    ] {
        let label = format!("{label}:");
        out.push_str(&format!("{label:<16}{}\n", or_missing(record.get(field))));
    }

    out.push('\n');
    out.push_str("Social Links\n");
    for platform in SocialPlatform::ALL {
        let link = record.social_links.get(&platform).map(String::as_str);
        out.push_str(&format!("  {:<12}{}\n", platform.label(), or_missing(link)));
    }

    out.push('\n');
    out.push_str("Major Campaigns\n");
    bullets(&mut out, &record.campaign_entries());

    out.push('\n');
    out.push_str("Celebrity Endorsements\n");
    bullets(&mut out, &record.endorsement_names());
    out
}

pub(crate) fn report_summary(report: &ReconcileReport) -> String {
    let mut out = format!(
        "{:<20}{:>8}{:>9}{:>9}{:>9}{:>9}{:>11}\n",
        "SOURCE", "ROWS", "SKIPPED", "NEW", "MERGED", "FILLED", "CONFLICTS"
    );
    for s in &report.sources {
        out.push_str(&format!(
            "{:<20}{:>8}{:>9}{:>9}{:>9}{:>9}{:>11}\n",
            clip(&s.source_name, 18),
            s.rows_read,
            s.rows_skipped,
            s.records_created,
            s.records_merged,
            s.fields_filled,
            s.conflicts_discarded
        ));
    }
    out.push_str(&format!("\n{} canonical records\n", report.total_records));
    out
}

#[cfg(test)]
mod tests {
    use brandex_reconcile::SourceStats;

    use super::*;

    fn acme() -> BrandRecord {
        let mut r = BrandRecord::new("Acme");
        r.industry = Some("Auto".to_string());
        r.celebrity_endorsements = Some("Star One; Star Two".to_string());
        r.social_links
            .insert(SocialPlatform::Instagram, "https://instagram.com/acme".to_string());
        r
    }

    #[test]
    fn brand_table_renders_absent_as_missing() {
        let rec = acme();
        let text = brand_table([&rec]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("Acme"));
        assert!(row.contains("Auto"));
        assert!(row.ends_with(MISSING));
    }

    #[test]
    fn brand_table_clips_long_names() {
        let rec = BrandRecord::new("A Very Long Brand Name That Overflows");
        let text = brand_table([&rec]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("A Very Long Brand Nam..."));
    }

    #[test]
    fn detail_lists_links_and_endorsements() {
        let text = brand_detail(&acme());
        assert!(text.contains("Parent Company: N/A"));
        assert!(text.contains("Instagram   https://instagram.com/acme"));
        assert!(text.contains("Twitter     N/A"));
        assert!(text.contains("  - Star One\n  - Star Two\n"));
        // no campaigns recorded
        assert!(text.contains("Major Campaigns\n  N/A\n"));
    }

    #[test]
    fn detail_opens_with_name_then_overview() {
        let text = brand_detail(&acme());
        assert!(text.starts_with(
            "Acme\n\nIndustry:       Auto\nRegion:         N/A\n\
             Parent Company: N/A\nWebsite:        N/A\n\nSocial Links\n"
        ));
        assert!(text.ends_with("Celebrity Endorsements\n  - Star One\n  - Star Two\n"));
    }

    #[test]
    fn counts_table_aligns_values() {
        let counts = vec![
            FacetCount {
                value: "Automotive".to_string(),
                count: 4,
            },
            FacetCount {
                value: "FMCG".to_string(),
                count: 2,
            },
        ];
        let text = counts_table(Field::Industry, &counts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "INDUSTRY    COUNT");
        assert_eq!(lines[1], "Automotive  4");
        assert_eq!(lines[2], "FMCG        2");
    }

    #[test]
    fn report_summary_lists_each_source() {
        let report = ReconcileReport {
            sources: vec![SourceStats {
                source_name: "brand_list".to_string(),
                rows_read: 10,
                rows_skipped: 1,
                records_created: 9,
                ..SourceStats::default()
            }],
            total_records: 9,
        };
        let text = report_summary(&report);
        assert!(text.lines().nth(1).unwrap().starts_with("brand_list"));
        assert!(text.ends_with("9 canonical records\n"));
    }
}
