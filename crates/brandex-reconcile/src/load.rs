//! Readers that turn delimited-text and spreadsheet files into [`SourceTable`]s.

use std::path::Path;

use brandex_core::{SourceConfig, SourceFormat, SourcesFile};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::{NaiveTime, Timelike};

use crate::columns::ColumnMap;
use crate::error::ReconcileError;
use crate::reconcile::{reconcile, Reconciled};
use crate::source::SourceTable;

/// Read a file as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported CSVs). A leading BOM is dropped.
fn read_text(path: &Path) -> Result<String, ReconcileError> {
    let bytes = std::fs::read(path).map_err(|e| ReconcileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(path = %path.display(), "input is not UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Load a delimited-text source. The first record is the header row.
///
/// # Errors
///
/// Returns [`ReconcileError::Io`] or [`ReconcileError::Csv`] on read/parse
/// failure and [`ReconcileError::EmptySource`] if there is no header row.
pub fn load_csv(
    name: &str,
    path: &Path,
    delimiter: u8,
    columns: ColumnMap,
) -> Result<SourceTable, ReconcileError> {
    let content = read_text(path)?;
    let csv_err = |e: csv::Error| ReconcileError::Csv {
        path: path.display().to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(ReconcileError::EmptySource {
            path: path.display().to_string(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    tracing::info!(source = name, path = %path.display(), rows = rows.len(), "loaded csv source");
    Ok(SourceTable::new(name, headers, rows).with_columns(columns))
}

/// Render a spreadsheet cell as text. Empty and error cells become `""`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        #[allow(clippy::cast_possible_truncation)]
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => excel_datetime_text(dt),
    }
}

/// ISO date for whole days, ISO date-time otherwise. Durations, and serials
/// chrono cannot place, fall back to the raw serial number.
fn excel_datetime_text(dt: &ExcelDateTime) -> String {
    let parsed = if dt.is_datetime() {
        dt.as_datetime()
    } else {
        None
    };
    match parsed {
        Some(at) if at.time() == NaiveTime::MIN => at.format("%Y-%m-%d").to_string(),
        Some(at) if at.nanosecond() == 0 => at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Some(at) => at.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        None => format!("{}", dt.as_f64()),
    }
}

/// Load one worksheet of a spreadsheet (xlsx, xls, xlsb, ods). The first row
/// is the header row; `sheet` defaults to the first worksheet.
///
/// # Errors
///
/// Returns [`ReconcileError::Excel`] if the workbook cannot be read,
/// [`ReconcileError::SheetNotFound`] for an unknown sheet, and
/// [`ReconcileError::EmptySource`] if the sheet has no rows.
pub fn load_excel(
    name: &str,
    path: &Path,
    sheet: Option<&str>,
    columns: ColumnMap,
) -> Result<SourceTable, ReconcileError> {
    let path_str = path.display().to_string();
    let mut workbook = open_workbook_auto(path).map_err(|e| ReconcileError::Excel {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|s| s.as_str() == wanted)
            .cloned()
            .ok_or_else(|| ReconcileError::SheetNotFound {
                path: path_str.clone(),
                sheet: wanted.to_string(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ReconcileError::EmptySource {
                path: path_str.clone(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconcileError::Excel {
            path: path_str.clone(),
            reason: format!("failed to read sheet '{sheet_name}': {e}"),
        })?;

    let mut raw_rows = range.rows();
    let headers: Vec<String> = raw_rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .ok_or(ReconcileError::EmptySource { path: path_str })?;

    let rows: Vec<Vec<String>> = raw_rows
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            cells.resize(headers.len(), String::new());
            cells
        })
        .collect();

    tracing::info!(
        source = name,
        path = %path.display(),
        sheet = %sheet_name,
        rows = rows.len(),
        "loaded spreadsheet source"
    );
    Ok(SourceTable::new(name, headers, rows).with_columns(columns))
}

/// Load one manifest entry, resolving its path against `base_dir`.
///
/// # Errors
///
/// Returns [`ReconcileError`] if the entry is invalid or the file cannot be read.
pub fn load_source(config: &SourceConfig, base_dir: &Path) -> Result<SourceTable, ReconcileError> {
    let path = config.resolve_path(base_dir);
    let columns = ColumnMap::with_renames(config.renames()?);
    match config.resolved_format()? {
        SourceFormat::Csv => load_csv(&config.name, &path, config.delimiter_byte()?, columns),
        SourceFormat::Excel => load_excel(&config.name, &path, config.sheet.as_deref(), columns),
    }
}

/// Load every source in manifest order and reconcile them.
///
/// # Errors
///
/// Returns the first load error, or the schema error from reconciliation.
pub fn reconcile_manifest(sources_file: &SourcesFile) -> Result<Reconciled, ReconcileError> {
    let tables = sources_file
        .sources
        .iter()
        .map(|config| load_source(config, &sources_file.base_dir))
        .collect::<Result<Vec<_>, _>>()?;
    reconcile(&tables)
}
