//! Shared XLSX specification models.

use crate::util::{derive_column_letter, derive_sheet_ref};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification with overlay semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

/// Normalized cell value during conversion/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Autofit policy for per-sheet write call.
///
/// Width is `max(header, body) + padding`, clamped to `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 1,
            width_cell_max: 255,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region GridSpecification

/// Rectangular placement of a table on a sheet grid (zero-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetRegion {
    /// Owning sheet name.
    pub sheet_name: String,
    /// First row index.
    pub row_start: usize,
    /// First column index.
    pub col_start: usize,
    /// Row count (>= 1 for a non-empty region).
    pub n_rows: usize,
    /// Column count (>= 1 for a non-empty region).
    pub n_cols: usize,
}

impl SpecSheetRegion {
    /// Last row index (inclusive).
    pub fn row_end(&self) -> usize {
        self.row_start + self.n_rows.saturating_sub(1)
    }

    /// Last column index (inclusive).
    pub fn col_end(&self) -> usize {
        self.col_start + self.n_cols.saturating_sub(1)
    }

    /// Whether the region covers no cell.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.n_cols == 0
    }
}

/// Absolute cell range on one sheet (zero-based, inclusive bounds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCellRange {
    /// Sheet the range points to.
    pub sheet_name: String,
    /// First row index.
    pub row_start: usize,
    /// First column index.
    pub col_start: usize,
    /// Last row index.
    pub row_end: usize,
    /// Last column index.
    pub col_end: usize,
}

impl SpecCellRange {
    /// Render as absolute A1 reference, e.g. `'Empresas'!$E$3:$E$5`.
    ///
    /// The sheet name is always quoted so chart series parse it verbatim.
    pub fn to_formula_ref(&self) -> String {
        format!(
            "'{}'!${}${}:${}${}",
            self.sheet_name.replace('\'', "''"),
            derive_column_letter(self.col_start),
            self.row_start + 1,
            derive_column_letter(self.col_end),
            self.row_end + 1,
        )
    }

    /// Render as relative A1 reference without sheet, e.g. `B3:B7`.
    pub fn to_local_ref(&self) -> String {
        format!(
            "{}{}:{}{}",
            derive_column_letter(self.col_start),
            self.row_start + 1,
            derive_column_letter(self.col_end),
            self.row_end + 1,
        )
    }

    /// Render a whole-column reference (`Sheet!C:C`) for the first column.
    pub fn to_column_ref(&self) -> String {
        let c_col = derive_column_letter(self.col_start);
        format!("{}!{c_col}:{c_col}", derive_sheet_ref(&self.sheet_name))
    }
}

/// Doughnut chart fed by one categories range and one values range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecDoughnutChart {
    /// Chart title.
    pub title: String,
    /// Series display name.
    pub series_name: String,
    /// Category labels.
    pub range_categories: SpecCellRange,
    /// Numeric values.
    pub range_values: SpecCellRange,
    /// Number format applied to percentage data labels.
    pub label_num_format: String,
    /// Chart width in pixels.
    pub width_px: u32,
    /// Chart height in pixels.
    pub height_px: u32,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Actual (sanitized, unique) sheet name in the workbook.
    pub sheet_name: String,
    /// Regions claimed on this sheet, in write order.
    pub regions: Vec<SpecSheetRegion>,
    /// Number of charts inserted.
    pub cnt_charts: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
