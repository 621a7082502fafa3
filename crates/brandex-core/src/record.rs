//! One row of the canonical brand table and the field vocabulary used to
//! address it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

// ---------------------------------------------------------------------------
// Field vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Instagram,
    Youtube,
    Linkedin,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Twitter,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Youtube,
        SocialPlatform::Linkedin,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Linkedin => "linkedin",
        }
    }

    /// Human-facing platform label, e.g. `"YouTube"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "Twitter",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Youtube => "YouTube",
            SocialPlatform::Linkedin => "LinkedIn",
        }
    }
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical column of the brand table.
///
/// Social platforms are individual columns in tabular form but live in
/// [`BrandRecord::social_links`] once a row has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BrandName,
    Industry,
    Region,
    ParentCompany,
    Website,
    Twitter,
    Facebook,
    Instagram,
    Youtube,
    Linkedin,
    Campaigns,
    CelebrityEndorsements,
}

impl Field {
    /// Canonical column order, used for the persisted header row.
    pub const ALL: [Field; 12] = [
        Field::BrandName,
        Field::Industry,
        Field::Region,
        Field::ParentCompany,
        Field::Website,
        Field::Twitter,
        Field::Facebook,
        Field::Instagram,
        Field::Youtube,
        Field::Linkedin,
        Field::Campaigns,
        Field::CelebrityEndorsements,
    ];

    /// Fields that together form the [`JoinKey`].
    pub const JOIN_KEY: [Field; 2] = [Field::BrandName, Field::Industry];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::BrandName => "brand_name",
            Field::Industry => "industry",
            Field::Region => "region",
            Field::ParentCompany => "parent_company",
            Field::Website => "website",
            Field::Twitter => "twitter",
            Field::Facebook => "facebook",
            Field::Instagram => "instagram",
            Field::Youtube => "youtube",
            Field::Linkedin => "linkedin",
            Field::Campaigns => "campaigns",
            Field::CelebrityEndorsements => "celebrity_endorsements",
        }
    }

    /// The social platform this column holds, if it is a social column.
    #[must_use]
    pub fn social_platform(self) -> Option<SocialPlatform> {
        match self {
            Field::Twitter => Some(SocialPlatform::Twitter),
            Field::Facebook => Some(SocialPlatform::Facebook),
            Field::Instagram => Some(SocialPlatform::Instagram),
            Field::Youtube => Some(SocialPlatform::Youtube),
            Field::Linkedin => Some(SocialPlatform::Linkedin),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_join_key(self) -> bool {
        matches!(self, Field::BrandName | Field::Industry)
    }
}

impl From<SocialPlatform> for Field {
    fn from(platform: SocialPlatform) -> Self {
        match platform {
            SocialPlatform::Twitter => Field::Twitter,
            SocialPlatform::Facebook => Field::Facebook,
            SocialPlatform::Instagram => Field::Instagram,
            SocialPlatform::Youtube => Field::Youtube,
            SocialPlatform::Linkedin => Field::Linkedin,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Identity of a brand entry across sources: `(brand_name, industry)`.
///
/// Compared exactly as provided; no case or whitespace folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JoinKey {
    pub brand_name: String,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub brand_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Only platforms with a link are present; never an empty-string entry.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<SocialPlatform, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebrity_endorsements: Option<String>,
}

/// Result of [`BrandRecord::fill_from`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Fields that were absent here and taken from the other record.
    pub filled: usize,
    /// Fields where both records had a value and they differed; the
    /// existing value was kept.
    pub conflicts: usize,
}

impl BrandRecord {
    #[must_use]
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            industry: None,
            region: None,
            parent_company: None,
            website: None,
            social_links: BTreeMap::new(),
            campaigns: None,
            celebrity_endorsements: None,
        }
    }

    #[must_use]
    pub fn join_key(&self) -> JoinKey {
        JoinKey {
            brand_name: self.brand_name.clone(),
            industry: self.industry.clone(),
        }
    }

    /// Value of `field`, or `None` when absent.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        if let Some(platform) = field.social_platform() {
            return self.social_links.get(&platform).map(String::as_str);
        }
        match field {
            Field::BrandName => Some(self.brand_name.as_str()),
            Field::Industry => self.industry.as_deref(),
            Field::Region => self.region.as_deref(),
            Field::ParentCompany => self.parent_company.as_deref(),
            Field::Website => self.website.as_deref(),
            Field::Campaigns => self.campaigns.as_deref(),
            Field::CelebrityEndorsements => self.celebrity_endorsements.as_deref(),
            Field::Twitter | Field::Facebook | Field::Instagram | Field::Youtube | Field::Linkedin => {
                None
            }
        }
    }

    /// Overwrite `field`. Setting `brand_name` to `None` is ignored since the
    /// name is mandatory.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        if let Some(platform) = field.social_platform() {
            match value {
                Some(v) => {
                    self.social_links.insert(platform, v);
                }
                None => {
                    self.social_links.remove(&platform);
                }
            }
            return;
        }
        match field {
            Field::BrandName => {
                if let Some(v) = value {
                    self.brand_name = v;
                }
            }
            Field::Industry => self.industry = value,
            Field::Region => self.region = value,
            Field::ParentCompany => self.parent_company = value,
            Field::Website => self.website = value,
            Field::Campaigns => self.campaigns = value,
            Field::CelebrityEndorsements => self.celebrity_endorsements = value,
            Field::Twitter | Field::Facebook | Field::Instagram | Field::Youtube | Field::Linkedin => {}
        }
    }

    /// Fill every absent field from `other`, keeping values already present.
    ///
    /// Join-key fields are never touched; callers merge only records that
    /// share a key.
    pub fn fill_from(&mut self, other: &BrandRecord) -> FillOutcome {
        let mut outcome = FillOutcome::default();
        for field in Field::ALL {
            if field.is_join_key() {
                continue;
            }
            let Some(incoming) = other.get(field) else {
                continue;
            };
            match self.get(field) {
                None => {
                    self.set(field, Some(incoming.to_string()));
                    outcome.filled += 1;
                }
                Some(existing) if existing != incoming => outcome.conflicts += 1,
                Some(_) => {}
            }
        }
        outcome
    }

    /// Celebrity names, split the way the dashboards list them.
    #[must_use]
    pub fn endorsement_names(&self) -> Vec<&str> {
        split_list(self.celebrity_endorsements.as_deref(), &[';', ','])
    }

    /// Individual campaign entries from the free-text `campaigns` field.
    #[must_use]
    pub fn campaign_entries(&self) -> Vec<&str> {
        split_list(self.campaigns.as_deref(), &[';', '\n'])
    }
}

fn split_list<'a>(value: Option<&'a str>, separators: &[char]) -> Vec<&'a str> {
    value
        .map(|v| {
            v.split(|c: char| separators.contains(&c))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
