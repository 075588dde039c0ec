//! Report data models and top-level error type.

use reqkit_io_xlsx::{SpecCellRange, SpecSheetRegion, SpecXlsxReport};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::conf::{C_LABEL_GRAND_TOTAL, C_LABEL_SUBTOTAL_PREFIX};

////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Report generation failure, mapped to a response at the request boundary.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required column cannot be resolved under any accepted name.
    #[error(
        "No se encontró la columna '{column}' (nombres aceptados: {candidates:?}). Columnas recibidas: {columns_found:?}"
    )]
    Schema {
        /// Canonical column name.
        column: String,
        /// Names tried, in order.
        candidates: Vec<String>,
        /// Columns actually present.
        columns_found: Vec<String>,
    },
    /// Request payload is missing keys or malformed.
    #[error("{0}")]
    Validation(String),
    /// Any other failure while aggregating or writing.
    #[error("{0}")]
    Internal(String),
}

impl ReportError {
    /// Lift a writer-kernel error text.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Records

/// One requisition row: ordered field name to scalar JSON value.
pub type Record = Map<String, Value>;

/// Record list plus its column set (union of keys, first-seen order).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRecordTable {
    /// Column order used for every sheet written from this table.
    pub columns: Vec<String>,
    /// Rows; a row may lack some columns (treated as missing).
    pub records: Vec<Record>,
}

impl SpecRecordTable {
    /// Build a table, deriving the column set from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for c_key in record.keys() {
                if !columns.iter().any(|c_col| c_col == c_key) {
                    columns.push(c_key.clone());
                }
            }
        }
        Self { columns, records }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.records.len()
    }

    /// Whether the column set contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c_col| c_col == name)
    }

    /// Zero-based position of `name` in the column set.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c_col| c_col == name)
    }

    /// Rename a column in the column set and in every record. No-op if absent.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        let Some(n_idx) = self.column_index(from) else {
            return;
        };
        self.columns[n_idx] = to.to_string();
        for record in &mut self.records {
            if let Some(value) = record.remove(from) {
                record.insert(to.to_string(), value);
            }
        }
    }

    /// Remove columns, ignoring names that are absent.
    pub fn drop_columns(&mut self, names: &[&str]) {
        self.columns.retain(|c_col| !names.contains(&c_col.as_str()));
        for record in &mut self.records {
            for c_name in names {
                record.remove(*c_name);
            }
        }
    }

    /// Append a column name if not already present.
    pub fn push_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}

/// Elapsed-time bucket derived from the day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumCategoryBucket {
    /// `[0, 20]` days.
    Low,
    /// `[21, 50]` days.
    Mid,
    /// More than 50 days (and, as received, negative counts).
    High,
}

impl EnumCategoryBucket {
    /// Display label written to the sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Entre 0 y 20",
            Self::Mid => "Entre 21 y 50",
            Self::High => "Mayor a 50",
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Aggregates

/// Sum of a numeric field over records sharing the grouping key(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAggregateRow {
    /// Grouping key values, one per grouping field.
    pub keys: Vec<String>,
    /// Summed value.
    pub total: i64,
}

impl SpecAggregateRow {
    /// Key at `idx`, or empty text when the row has fewer keys.
    pub fn key(&self, idx: usize) -> &str {
        self.keys.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Row role inside a grouped table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumGroupedRowKind {
    /// Inner (outer, inner, total) data row.
    Detail,
    /// Row closing one outer group.
    Subtotal,
    /// Row closing the whole table.
    GrandTotal,
}

/// One emitted row of a grouped-sorted-subtotal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGroupedRow {
    /// Row role.
    pub kind: EnumGroupedRowKind,
    /// Outer key (empty on the grand-total row).
    pub outer: String,
    /// Inner key (empty on subtotal/grand-total rows).
    pub inner: String,
    /// Row value.
    pub total: i64,
}

impl SpecGroupedRow {
    /// Text written in the first column.
    pub fn label(&self) -> String {
        match self.kind {
            EnumGroupedRowKind::Detail => self.outer.clone(),
            EnumGroupedRowKind::Subtotal => format!("{C_LABEL_SUBTOTAL_PREFIX}{}", self.outer),
            EnumGroupedRowKind::GrandTotal => C_LABEL_GRAND_TOTAL.to_string(),
        }
    }
}

/// Ordered rows: groups by descending total, each closed by a subtotal,
/// the table closed by one grand-total row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecGroupedTable {
    /// Emitted rows in write order.
    pub rows: Vec<SpecGroupedRow>,
}

impl SpecGroupedTable {
    /// Value of the grand-total row (0 when absent).
    pub fn grand_total(&self) -> i64 {
        self.rows
            .iter()
            .rev()
            .find(|row| row.kind == EnumGroupedRowKind::GrandTotal)
            .map_or(0, |row| row.total)
    }

    /// Sum over detail rows only.
    pub fn detail_total(&self) -> i64 {
        self.rows
            .iter()
            .filter(|row| row.kind == EnumGroupedRowKind::Detail)
            .map(|row| row.total)
            .sum()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PivotLayout

/// One `(category, total)` pair of a summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummaryRow {
    /// Category label.
    pub category: String,
    /// Summed value.
    pub total: i64,
}

/// Category/total side table before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummaryTable {
    /// Header of the category column.
    pub header_category: String,
    /// Header of the value column.
    pub header_value: String,
    /// Data rows.
    pub rows: Vec<SpecSummaryRow>,
}

/// Summary table placed on a sheet grid (zero-based coordinates).
///
/// Layout: header at `row_start`, categories on the following rows,
/// then the total row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPivotPlacement {
    /// Header of the category column.
    pub header_category: String,
    /// Header of the value column.
    pub header_value: String,
    /// Data rows, including an injected placeholder.
    pub rows: Vec<SpecSummaryRow>,
    /// Value of the total row.
    pub total: i64,
    /// Header row index.
    pub row_start: usize,
    /// Category column index; values sit one column to the right.
    pub col_start: usize,
    /// Whether a placeholder row was injected.
    pub if_placeholder_added: bool,
}

impl SpecPivotPlacement {
    /// Category rows (data + placeholder).
    pub fn n_categories(&self) -> usize {
        self.rows.len()
    }

    /// Total rows written: header + categories + total.
    pub fn n_rows(&self) -> usize {
        self.n_categories() + 2
    }

    /// Row index of the total row.
    pub fn row_total(&self) -> usize {
        self.row_start + self.n_categories() + 1
    }

    /// Occupied grid region.
    pub fn region(&self, sheet_name: &str) -> SpecSheetRegion {
        SpecSheetRegion {
            sheet_name: sheet_name.to_string(),
            row_start: self.row_start,
            col_start: self.col_start,
            n_rows: self.n_rows(),
            n_cols: 2,
        }
    }

    /// Category labels range for a chart series; `None` without categories.
    pub fn range_categories(&self, sheet_name: &str) -> Option<SpecCellRange> {
        self.derive_data_range(sheet_name, self.col_start)
    }

    /// Values range for a chart series; `None` without categories.
    pub fn range_values(&self, sheet_name: &str) -> Option<SpecCellRange> {
        self.derive_data_range(sheet_name, self.col_start + 1)
    }

    fn derive_data_range(&self, sheet_name: &str, col_idx: usize) -> Option<SpecCellRange> {
        if self.rows.is_empty() {
            return None;
        }
        Some(SpecCellRange {
            sheet_name: sheet_name.to_string(),
            row_start: self.row_start + 1,
            col_start: col_idx,
            row_end: self.row_start + self.n_categories(),
            col_end: col_idx,
        })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormulaSummary

/// One label + formula row of a formula block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFormulaRow {
    /// First-column label.
    pub label: String,
    /// Second-column formula, with leading `=`.
    pub formula: String,
}

/// COUNTIF-per-category block closed by a SUM row (zero-based rows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFormulaBlock {
    /// Source column name (also the block's first header).
    pub column: String,
    /// Header row index.
    pub row_header: usize,
    /// Category rows, on consecutive rows after the header.
    pub rows: Vec<SpecFormulaRow>,
    /// Total row, right after the last category row.
    pub total: SpecFormulaRow,
}

impl SpecFormulaBlock {
    /// Row index of the total row.
    pub fn row_total(&self) -> usize {
        self.row_header + self.rows.len() + 1
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Artifact

/// Finished workbook ready for download.
#[derive(Debug, Clone)]
pub struct SpecReportArtifact {
    /// Download file name.
    pub file_name: String,
    /// XLSX bytes.
    pub bytes: Vec<u8>,
    /// Per-sheet write reports.
    pub sheets: Vec<SpecXlsxReport>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
