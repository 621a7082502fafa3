//! Header-to-field resolution for source tables.

use std::collections::BTreeMap;

use brandex_core::Field;

/// Display headers used by the original brand spreadsheets.
const BUILTIN_ALIASES: [(&str, Field); 17] = [
    ("brand", Field::BrandName),
    ("brand name", Field::BrandName),
    ("industry", Field::Industry),
    ("region", Field::Region),
    ("parent company", Field::ParentCompany),
    ("website", Field::Website),
    ("twitter", Field::Twitter),
    ("x (twitter)", Field::Twitter),
    ("facebook", Field::Facebook),
    ("instagram", Field::Instagram),
    ("youtube", Field::Youtube),
    ("linkedin", Field::Linkedin),
    ("major campaigns (past 5 years)", Field::Campaigns),
    ("major campaigns", Field::Campaigns),
    ("campaigns", Field::Campaigns),
    ("celebrity endorsements", Field::CelebrityEndorsements),
    ("celebrity endorsement", Field::CelebrityEndorsements),
];

/// Maps a source's headers onto canonical fields.
///
/// Lookup order: explicit rename, exact canonical name, built-in alias
/// (case-insensitive, trimmed).
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    renames: BTreeMap<String, Field>,
}

impl ColumnMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_renames(renames: BTreeMap<String, Field>) -> Self {
        Self { renames }
    }

    #[must_use]
    pub fn rename(mut self, header: impl Into<String>, field: Field) -> Self {
        self.renames.insert(header.into(), field);
        self
    }

    /// The canonical field for `header`, or `None` if the column is not mapped.
    #[must_use]
    pub fn resolve(&self, header: &str) -> Option<Field> {
        if let Some(field) = self
            .renames
            .get(header)
            .or_else(|| self.renames.get(header.trim()))
        {
            return Some(*field);
        }
        if let Ok(field) = header.parse::<Field>() {
            return Some(field);
        }
        let folded = header.trim().to_lowercase();
        BUILTIN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == folded)
            .map(|(_, field)| *field)
    }
}
