//! The sources manifest: which files feed reconciliation, in what order, and
//! how their headers map onto canonical fields.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::Field;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Excel,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Excel => write!(f, "excel"),
        }
    }
}

impl SourceFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(SourceFormat::Excel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub path: PathBuf,
    pub format: Option<SourceFormat>,
    pub delimiter: Option<String>,
    pub sheet: Option<String>,
    /// Source header -> canonical field name.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl SourceConfig {
    /// The configured format, or the one implied by the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither is available.
    pub fn resolved_format(&self) -> Result<SourceFormat, ConfigError> {
        self.format
            .or_else(|| SourceFormat::from_path(&self.path))
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "source '{}': cannot infer format from '{}'; set `format`",
                    self.name,
                    self.path.display()
                ))
            })
    }

    /// CSV delimiter byte. Defaults to tab for `.tsv` files and comma otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the delimiter is not one ASCII byte.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match &self.delimiter {
            Some(raw) => crate::config::parse_delimiter(raw).map_err(|_| {
                ConfigError::Validation(format!(
                    "source '{}': delimiter must be a single ASCII character; got '{raw}'",
                    self.name
                ))
            }),
            None => {
                let is_tsv = self
                    .path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
                Ok(if is_tsv { b'\t' } else { b',' })
            }
        }
    }

    /// Parsed rename map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first unknown field.
    pub fn renames(&self) -> Result<BTreeMap<String, Field>, ConfigError> {
        self.columns
            .iter()
            .map(|(header, field)| {
                field
                    .parse::<Field>()
                    .map(|f| (header.clone(), f))
                    .map_err(|e| {
                        ConfigError::Validation(format!(
                            "source '{}': column '{header}': {e}",
                            self.name
                        ))
                    })
            })
            .collect()
    }

    /// Resolve `path` against the manifest directory.
    #[must_use]
    pub fn resolve_path(&self, base_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base_dir.join(&self.path)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
    /// Directory containing the manifest; relative source paths resolve here.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Load and validate the sources manifest from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;
    sources_file.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source is required".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(source.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }

        if source.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty path",
                source.name
            )));
        }

        match source.resolved_format()? {
            SourceFormat::Csv => {
                if source.sheet.is_some() {
                    return Err(ConfigError::Validation(format!(
                        "source '{}': `sheet` only applies to excel sources",
                        source.name
                    )));
                }
                source.delimiter_byte()?;
            }
            SourceFormat::Excel => {
                if source.delimiter.is_some() {
                    return Err(ConfigError::Validation(format!(
                        "source '{}': `delimiter` only applies to csv sources",
                        source.name
                    )));
                }
            }
        }

        source.renames()?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
