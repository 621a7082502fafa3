//! Single-record lookups by brand name or full join key.
//!
//! Names are compared exactly. The canonical key is `(brand_name, industry)`,
//! so one name can map to several records; [`find_brand`] returns the first
//! in table order and [`find_brand_strict`] refuses to guess.

use brandex_core::{BrandRecord, CanonicalTable, JoinKey};

use crate::error::QueryError;

/// First record whose name is `brand_name`.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] if no record carries the name.
pub fn find_brand<'a>(
    table: &'a CanonicalTable,
    brand_name: &str,
) -> Result<&'a BrandRecord, QueryError> {
    table
        .iter()
        .find(|r| r.brand_name == brand_name)
        .ok_or_else(|| QueryError::NotFound {
            brand_name: brand_name.to_string(),
        })
}

/// The only record whose name is `brand_name`.
///
/// # Errors
///
/// Returns [`QueryError::NotFound`] if no record carries the name and
/// [`QueryError::AmbiguousMatch`] if more than one does.
pub fn find_brand_strict<'a>(
    table: &'a CanonicalTable,
    brand_name: &str,
) -> Result<&'a BrandRecord, QueryError> {
    let mut matches = table.iter().filter(|r| r.brand_name == brand_name);
    let first = matches.next().ok_or_else(|| QueryError::NotFound {
        brand_name: brand_name.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(QueryError::AmbiguousMatch {
            brand_name: brand_name.to_string(),
            matches: extra + 1,
        });
    }
    Ok(first)
}

/// Record with exactly this join key, if any.
#[must_use]
pub fn find_by_key<'a>(table: &'a CanonicalTable, key: &JoinKey) -> Option<&'a BrandRecord> {
    table
        .iter()
        .find(|r| r.brand_name == key.brand_name && r.industry == key.industry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CanonicalTable {
        let mut acme_auto = BrandRecord::new("Acme");
        acme_auto.industry = Some("Auto".to_string());
        acme_auto.website = Some("acme-auto.com".to_string());
        let mut acme_food = BrandRecord::new("Acme");
        acme_food.industry = Some("Food".to_string());
        let solo = BrandRecord::new("Solo");
        CanonicalTable::new(vec![acme_auto, acme_food, solo], vec!["test".to_string()])
    }

    #[test]
    fn find_brand_returns_first_match() {
        let t = table();
        let found = find_brand(&t, "Acme").unwrap();
        assert_eq!(found.industry.as_deref(), Some("Auto"));
    }

    #[test]
    fn find_brand_is_case_sensitive() {
        let t = table();
        let err = find_brand(&t, "acme").unwrap_err();
        assert!(matches!(err, QueryError::NotFound { ref brand_name } if brand_name == "acme"));
    }

    #[test]
    fn find_brand_strict_reports_ambiguity() {
        let t = table();
        let err = find_brand_strict(&t, "Acme").unwrap_err();
        assert!(matches!(err, QueryError::AmbiguousMatch { matches: 2, .. }));
        assert_eq!(find_brand_strict(&t, "Solo").unwrap().brand_name, "Solo");
    }

    #[test]
    fn find_by_key_distinguishes_absent_industry() {
        let t = table();
        let food = JoinKey {
            brand_name: "Acme".to_string(),
            industry: Some("Food".to_string()),
        };
        assert!(find_by_key(&t, &food).is_some());

        let bare = JoinKey {
            brand_name: "Acme".to_string(),
            industry: None,
        };
        assert!(find_by_key(&t, &bare).is_none());

        let solo = JoinKey {
            brand_name: "Solo".to_string(),
            industry: None,
        };
        assert_eq!(find_by_key(&t, &solo).unwrap().brand_name, "Solo");
    }
}
