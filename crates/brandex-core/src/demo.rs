//! Built-in demo dataset, used when no source files are available.

use crate::record::{BrandRecord, SocialPlatform};
use crate::table::CanonicalTable;

/// `(brand, industry, parent company)`; every demo brand is in region India.
const DEMO_BRANDS: [(&str, &str, &str); 15] = [
    ("Tata Motors", "Automotive", "Tata Group"),
    ("Reliance Jio", "Telecommunications", "Reliance Industries"),
    ("HDFC Bank", "Banking & Finance", "HDFC Limited"),
    ("Infosys", "IT Services", "Infosys Limited"),
    ("Asian Paints", "Paints & Chemicals", "Asian Paints Limited"),
    ("Bajaj Auto", "Automotive", "Bajaj Group"),
    ("ITC Limited", "FMCG", "ITC Limited"),
    ("Mahindra", "Automotive", "Mahindra Group"),
    ("Wipro", "IT Services", "Wipro Limited"),
    ("Bharti Airtel", "Telecommunications", "Bharti Enterprises"),
    ("L&T", "Construction & Engineering", "Larsen & Toubro"),
    ("SBI", "Banking & Finance", "Government of India"),
    ("Titan", "Jewelry & Watches", "Tata Group"),
    ("Godrej", "FMCG", "Godrej Group"),
    ("Maruti Suzuki", "Automotive", "Suzuki Motor Corporation"),
];

const DEMO_SOURCE_NAME: &str = "demo";

/// Lowercased brand name with everything but ASCII alphanumerics removed,
/// e.g. `"L&T"` -> `"lt"`.
fn handle(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[must_use]
pub fn demo_records() -> Vec<BrandRecord> {
    DEMO_BRANDS
        .iter()
        .map(|&(name, industry, parent)| {
            let handle = handle(name);
            let mut record = BrandRecord::new(name);
            record.industry = Some(industry.to_string());
            record.region = Some("India".to_string());
            record.parent_company = Some(parent.to_string());
            record.website = Some(format!("https://{handle}.com"));
            for platform in [
                SocialPlatform::Twitter,
                SocialPlatform::Instagram,
                SocialPlatform::Facebook,
            ] {
                record
                    .social_links
                    .insert(platform, format!("https://{platform}.com/{handle}"));
            }
            record
        })
        .collect()
}

/// The demo records wrapped as a canonical table.
#[must_use]
pub fn demo_table() -> CanonicalTable {
    CanonicalTable::new(demo_records(), vec![DEMO_SOURCE_NAME.to_string()])
}
