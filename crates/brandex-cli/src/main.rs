mod browse;
mod reconcile;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use brandex_core::{AppConfig, CanonicalTable, Field};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use browse::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "brandex")]
#[command(about = "Reconcile and browse the brand dataset")]
struct Cli {
    /// Canonical table to read (defaults to `BRANDEX_CANONICAL_PATH`)
    #[arg(long, global = true)]
    canonical: Option<PathBuf>,

    /// Use the built-in demo dataset instead of any file
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge the configured sources into the canonical table
    Reconcile {
        /// Sources manifest (defaults to `BRANDEX_SOURCES_PATH`)
        #[arg(long)]
        sources: Option<PathBuf>,
        /// Output path (defaults to the canonical table path)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Report what would be written without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// List brands matching the filters
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Count filtered brands grouped by one field
    Counts {
        /// Field to group by (e.g. industry, region, parent_company)
        #[arg(long)]
        by: Field,
        /// Only show the N most frequent values
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one brand in detail
    Show {
        /// Exact brand name
        brand: String,
        /// Fail if the name matches more than one record
        #[arg(long)]
        strict: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the distinct values of a field
    Facets {
        /// Field to list (e.g. industry, region)
        field: Field,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = brandex_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config);
    tracing::debug!(env = %config.env, "starting brandex");

    let table = || load_table(cli.canonical.as_deref(), cli.demo, &config);

    match &cli.command {
        Some(Commands::Reconcile {
            sources,
            out,
            dry_run,
        }) => {
            let sources = sources.as_deref().unwrap_or(&config.sources_path);
            let out = out
                .as_deref()
                .or(cli.canonical.as_deref())
                .unwrap_or(&config.canonical_path);
            reconcile::run_reconcile(sources, out, config.csv_delimiter, *dry_run)
        }
        Some(Commands::List { filter, json }) => browse::run_list(&table()?, filter, *json),
        Some(Commands::Counts {
            by,
            top,
            filter,
            json,
        }) => browse::run_counts(&table()?, filter, *by, *top, *json),
        Some(Commands::Show {
            brand,
            strict,
            json,
        }) => browse::run_show(&table()?, brand, *strict, *json),
        Some(Commands::Facets { field }) => {
            browse::run_facets(&table()?, *field);
            Ok(())
        }
        None => {
            browse::run_overview(&table()?);
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over `BRANDEX_LOG_LEVEL`. Logs go to stderr so stdout
/// stays clean for tables and JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The demo table, or the persisted canonical table read back through the
/// reconciler.
fn load_table(
    canonical: Option<&Path>,
    demo: bool,
    config: &AppConfig,
) -> anyhow::Result<CanonicalTable> {
    if demo {
        tracing::info!("using built-in demo dataset");
        return Ok(brandex_core::demo::demo_table());
    }
    let path = canonical.unwrap_or(&config.canonical_path);
    read_table(path, config.csv_delimiter)
}

fn read_table(path: &Path, delimiter: u8) -> anyhow::Result<CanonicalTable> {
    if !path.exists() {
        anyhow::bail!(
            "canonical table not found at {}; run `brandex reconcile` first or pass --demo",
            path.display()
        );
    }
    brandex_reconcile::read_canonical_table(path, delimiter)
        .with_context(|| format!("failed to read canonical table {}", path.display()))
}
