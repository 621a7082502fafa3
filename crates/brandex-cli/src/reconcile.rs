//! `brandex reconcile`: load the sources manifest, merge, persist.

use std::path::Path;

use anyhow::Context;
use brandex_reconcile::{reconcile_manifest, write_canonical};

use crate::render;

/// Reconcile every source in the manifest at `sources_path` and write the
/// canonical table to `out`. With `dry_run` the report is printed and
/// nothing is written.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, a source cannot be loaded,
/// a source lacks a join-key column, or the output cannot be written.
pub(crate) fn run_reconcile(
    sources_path: &Path,
    out: &Path,
    delimiter: u8,
    dry_run: bool,
) -> anyhow::Result<()> {
    let manifest = brandex_core::load_sources(sources_path)
        .with_context(|| format!("failed to load sources manifest {}", sources_path.display()))?;
    tracing::info!(
        manifest = %sources_path.display(),
        sources = manifest.sources.len(),
        "reconciling sources"
    );

    let reconciled = reconcile_manifest(&manifest).context("reconciliation failed")?;
    print!("{}", render::report_summary(&reconciled.report));

    if dry_run {
        println!("[dry-run] would write {}", out.display());
        return Ok(());
    }

    write_canonical(out, &reconciled.table, delimiter)
        .with_context(|| format!("failed to write canonical table {}", out.display()))?;
    println!("wrote {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(dir: &Path) -> std::path::PathBuf {
        std::fs::write(
            dir.join("list.csv"),
            "Brand,Industry,Parent Company\nAcme,Auto,AcmeCo\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("extra.csv"),
            "brand_name,industry,website\nAcme,Auto,acme.com\nBolt,Auto,\n",
        )
        .unwrap();
        let manifest = dir.join("sources.yaml");
        std::fs::write(
            &manifest,
            "sources:\n  - name: list\n    path: list.csv\n  - name: extra\n    path: extra.csv\n",
        )
        .unwrap();
        manifest
    }

    #[test]
    fn writes_canonical_table() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_fixture(dir.path());
        let out = dir.path().join("out").join("canonical.csv");

        run_reconcile(&manifest, &out, b',', false).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Acme,Auto,,AcmeCo,acme.com"));
        assert!(lines[2].starts_with("Bolt,Auto,"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_fixture(dir.path());
        let out = dir.path().join("canonical.csv");

        run_reconcile(&manifest, &out, b',', true).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_reconcile(
            &dir.path().join("nope.yaml"),
            &dir.path().join("out.csv"),
            b',',
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to load sources manifest"));
    }
}
