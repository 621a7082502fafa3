use brandex_core::ConfigError;
use thiserror::Error;

/// Errors surfaced while loading or reconciling brand sources.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A source lacks one or more join-key columns after header resolution.
    #[error("source '{source_name}' is missing required column(s): {}", .missing.join(", "))]
    Schema {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("spreadsheet error in {path}: {reason}")]
    Excel { path: String, reason: String },

    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: String, sheet: String },

    /// The provenance file beside a persisted table is unreadable.
    #[error("invalid provenance file {path}: {source}")]
    Provenance {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file has no header row to resolve columns from.
    #[error("{path} has no header row")]
    EmptySource { path: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
