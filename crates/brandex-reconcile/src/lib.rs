//! Merges heterogeneous brand sources into one canonical table.
//!
//! Sources are loaded from CSV or spreadsheet files ([`load`]), their headers
//! resolved onto canonical fields ([`columns`]), and merged with
//! earlier-source-wins precedence ([`reconcile()`]).

pub mod columns;
pub mod error;
pub mod load;
pub mod persist;
pub mod reconcile;
pub mod source;

pub use columns::ColumnMap;
pub use error::ReconcileError;
pub use load::{load_csv, load_excel, load_source, reconcile_manifest};
pub use persist::{provenance_path, read_canonical, read_canonical_table, write_canonical};
pub use reconcile::{check_schemas, reconcile, ReconcileReport, Reconciled, SourceStats};
pub use source::SourceTable;
