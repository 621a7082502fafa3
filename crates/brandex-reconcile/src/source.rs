use brandex_core::{clean_value, BrandRecord, CanonicalTable, Field};

use crate::columns::ColumnMap;

/// One tabular input to reconciliation: a header row, data rows, and the
/// rename map that normalizes the headers onto canonical fields.
///
/// Rows shorter than the header are treated as having absent trailing cells.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub columns: ColumnMap,
}

impl SourceTable {
    #[must_use]
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
            columns: ColumnMap::new(),
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// Re-express a reconciled table as a source, with canonical headers.
    #[must_use]
    pub fn from_canonical(name: impl Into<String>, table: &CanonicalTable) -> Self {
        let headers = Field::ALL.iter().map(|f| f.as_str().to_string()).collect();
        let rows = table
            .iter()
            .map(|record| {
                Field::ALL
                    .iter()
                    .map(|f| record.get(*f).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        Self::new(name, headers, rows)
    }

    /// Resolved field for each header position.
    #[must_use]
    pub fn resolved_columns(&self) -> Vec<Option<Field>> {
        self.headers
            .iter()
            .map(|h| self.columns.resolve(h))
            .collect()
    }

    /// Join-key fields with no column in this source.
    #[must_use]
    pub fn missing_key_fields(&self) -> Vec<Field> {
        let resolved = self.resolved_columns();
        Field::JOIN_KEY
            .into_iter()
            .filter(|key| !resolved.contains(&Some(*key)))
            .collect()
    }

    /// Headers that map to no canonical field.
    #[must_use]
    pub fn ignored_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .zip(self.resolved_columns())
            .filter(|(_, field)| field.is_none())
            .map(|(h, _)| h.as_str())
            .collect()
    }

    /// Build a record from one row.
    ///
    /// When several columns resolve to the same field, the leftmost
    /// non-absent cell wins. Returns `None` if the row has no brand name.
    pub(crate) fn record_from_row(
        resolved: &[Option<Field>],
        row: &[String],
    ) -> Option<BrandRecord> {
        let cells: Vec<(Field, String)> = resolved
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| {
                let field = (*field)?;
                let raw = row.get(idx)?;
                clean_value(field, raw).map(|v| (field, v))
            })
            .collect();

        let brand_name = cells
            .iter()
            .find(|(field, _)| *field == Field::BrandName)
            .map(|(_, v)| v.clone())?;

        let mut record = BrandRecord::new(brand_name);
        for (field, value) in cells {
            if field != Field::BrandName && record.get(field).is_none() {
                record.set(field, Some(value));
            }
        }
        Some(record)
    }
}
