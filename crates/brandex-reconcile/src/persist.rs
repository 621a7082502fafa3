//! Flat-file persistence of the canonical table.
//!
//! One header row of canonical field names, one row per record, absent
//! fields written as empty cells. The contributing source names and build
//! time go to a JSON file beside it (see [`provenance_path`]).

use std::path::{Path, PathBuf};

use brandex_core::{CanonicalTable, Field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::columns::ColumnMap;
use crate::error::ReconcileError;
use crate::load::load_csv;
use crate::reconcile::reconcile;
use crate::source::SourceTable;

#[derive(Debug, Serialize, Deserialize)]
struct Provenance {
    sources: Vec<String>,
    built_at: DateTime<Utc>,
}

/// Where the provenance of the table at `path` is kept:
/// `brands_canonical.csv` pairs with `brands_canonical.sources.json`.
#[must_use]
pub fn provenance_path(path: &Path) -> PathBuf {
    path.with_extension("sources.json")
}

/// Write `table` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ReconcileError::Io`] or [`ReconcileError::Csv`] on write failure,
/// or [`ReconcileError::Provenance`] if the provenance cannot be encoded.
pub fn write_canonical(
    path: &Path,
    table: &CanonicalTable,
    delimiter: u8,
) -> Result<(), ReconcileError> {
    let path_str = path.display().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ReconcileError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let csv_err = |e: csv::Error| ReconcileError::Csv {
        path: path_str.clone(),
        source: e,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_err)?;

    writer
        .write_record(Field::ALL.iter().map(|f| f.as_str()))
        .map_err(csv_err)?;
    for record in table {
        writer
            .write_record(Field::ALL.iter().map(|f| record.get(*f).unwrap_or_default()))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| ReconcileError::Io {
        path: path_str.clone(),
        source: e,
    })?;

    write_provenance(path, table)?;

    tracing::info!(path = %path_str, records = table.len(), "wrote canonical table");
    Ok(())
}

fn write_provenance(path: &Path, table: &CanonicalTable) -> Result<(), ReconcileError> {
    let sidecar = provenance_path(path);
    let sidecar_str = sidecar.display().to_string();
    let provenance = Provenance {
        sources: table.sources().to_vec(),
        built_at: table.built_at(),
    };
    let body =
        serde_json::to_vec_pretty(&provenance).map_err(|e| ReconcileError::Provenance {
            path: sidecar_str.clone(),
            source: e,
        })?;
    std::fs::write(&sidecar, body).map_err(|e| ReconcileError::Io {
        path: sidecar_str,
        source: e,
    })
}

fn read_provenance(path: &Path) -> Result<Option<Provenance>, ReconcileError> {
    let sidecar = provenance_path(path);
    if !sidecar.exists() {
        return Ok(None);
    }
    let sidecar_str = sidecar.display().to_string();
    let body = std::fs::read(&sidecar).map_err(|e| ReconcileError::Io {
        path: sidecar_str.clone(),
        source: e,
    })?;
    serde_json::from_slice(&body)
        .map(Some)
        .map_err(|e| ReconcileError::Provenance {
            path: sidecar_str,
            source: e,
        })
}

/// Read a file written by [`write_canonical`] back as a source.
///
/// The source is named after the file stem.
///
/// # Errors
///
/// Returns [`ReconcileError`] if the file cannot be read or parsed.
pub fn read_canonical(path: &Path, delimiter: u8) -> Result<SourceTable, ReconcileError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("canonical");
    load_csv(name, path, delimiter, ColumnMap::new())
}

/// Read a persisted table back into a [`CanonicalTable`], restoring the
/// source names and build time recorded by [`write_canonical`].
///
/// Without a provenance file the table is attributed to the file stem.
///
/// # Errors
///
/// Returns [`ReconcileError`] if the table or its provenance file cannot be
/// read or parsed.
pub fn read_canonical_table(path: &Path, delimiter: u8) -> Result<CanonicalTable, ReconcileError> {
    let source = read_canonical(path, delimiter)?;
    let table = reconcile(&[source])?.table;
    match read_provenance(path)? {
        Some(provenance) => Ok(CanonicalTable::restored(
            table.into_records(),
            provenance.sources,
            provenance.built_at,
        )),
        None => {
            tracing::debug!(path = %path.display(), "no provenance file; naming source after file");
            Ok(table)
        }
    }
}

#[cfg(test)]
mod tests {
    use brandex_core::{BrandRecord, SocialPlatform};

    use super::*;

    #[test]
    fn write_then_read_reproduces_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("brands.csv");

        let mut acme = BrandRecord::new("Acme");
        acme.industry = Some("Auto".to_string());
        acme.celebrity_endorsements = Some("A, B; C".to_string());
        acme.social_links
            .insert(SocialPlatform::Twitter, "https://twitter.com/acme".to_string());
        let mut bare = BrandRecord::new("Bare, Inc.");
        bare.region = Some("India".to_string());
        let table = CanonicalTable::new(vec![acme, bare], vec!["s1".to_string()]);

        write_canonical(&path, &table, b',').unwrap();
        let source = read_canonical(&path, b',').unwrap();
        assert_eq!(source.name, "brands");

        let round = reconcile(&[source]).unwrap();
        assert_eq!(round.table.records(), table.records());
    }

    #[test]
    fn read_table_restores_sources_and_build_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands_canonical.csv");
        let table = CanonicalTable::new(
            vec![BrandRecord::new("Acme")],
            vec!["list".to_string(), "extra".to_string()],
        );

        write_canonical(&path, &table, b',').unwrap();
        assert!(dir.path().join("brands_canonical.sources.json").exists());

        let restored = read_canonical_table(&path, b',').unwrap();
        assert_eq!(restored.records(), table.records());
        assert_eq!(restored.sources(), ["list", "extra"]);
        assert_eq!(restored.built_at(), table.built_at());
    }

    #[test]
    fn read_table_without_provenance_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.csv");
        let table = CanonicalTable::new(vec![BrandRecord::new("Acme")], vec!["s1".to_string()]);

        write_canonical(&path, &table, b',').unwrap();
        std::fs::remove_file(provenance_path(&path)).unwrap();

        let restored = read_canonical_table(&path, b',').unwrap();
        assert_eq!(restored.sources(), ["brands"]);
    }

    #[test]
    fn corrupt_provenance_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.csv");
        let table = CanonicalTable::new(vec![BrandRecord::new("Acme")], vec![]);

        write_canonical(&path, &table, b',').unwrap();
        std::fs::write(provenance_path(&path), "{not json").unwrap();

        let err = read_canonical_table(&path, b',').unwrap_err();
        assert!(matches!(err, ReconcileError::Provenance { .. }));
    }

    #[test]
    fn header_row_uses_canonical_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brands.tsv");
        let table = CanonicalTable::new(vec![], vec![]);

        write_canonical(&path, &table, b'\t').unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("brand_name\tindustry\tregion\tparent_company"));
        assert!(header.ends_with("campaigns\tcelebrity_endorsements"));
    }
}
