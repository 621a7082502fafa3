//! Shared data model and configuration for the brand dataset workspace.
//!
//! The canonical table produced by `brandex-reconcile` and consumed by
//! `brandex-query` is defined here, together with the process config
//! (env vars) and the sources manifest (YAML).

pub mod app_config;
pub mod clean;
pub mod config;
pub mod demo;
pub mod record;
pub mod sources;
pub mod table;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use clean::{clean_value, is_placeholder};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{BrandRecord, FillOutcome, Field, JoinKey, SocialPlatform};
pub use sources::{load_sources, SourceConfig, SourceFormat, SourcesFile};
pub use table::CanonicalTable;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown canonical field: '{0}'")]
    UnknownField(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[source] serde_yaml::Error),

    #[error("sources validation error: {0}")]
    Validation(String),
}
