//! Report constants: column names, labels, layout anchors and style presets.

use reqkit_io_xlsx::SpecCellFormat;

////////////////////////////////////////////////////////////////////////////////
// #region Columns

/// Status column.
pub const C_COL_STATUS: &str = "Estado";
/// Status value whose rows are excluded from the analytic report.
pub const C_STATUS_EXCLUDED: &str = "Cerrado";
/// Columns removed before any aggregation.
pub const TUP_COLS_DROPPED: [&str; 3] = [
    "Adicionales",
    "Contratados a tiempo",
    "No contratados a tiempo",
];
/// Accepted spellings of the day-count column, tried in order.
pub const TUP_COL_DAYS_ALIASES: [&str; 3] = ["Días", "Dias", "dias"];
/// Canonical day-count column.
pub const C_COL_DAYS: &str = "Dias";
/// Pending-count column.
pub const C_COL_PENDING: &str = "Pendientes";
/// Analyst column as received.
pub const C_COL_ANALYST: &str = "Psicólogo";
/// Analyst column after normalization.
pub const C_COL_ANALYST_NORM: &str = "Psicologo";
/// Company column as received.
pub const C_COL_COMPANY: &str = "Compañía";
/// Company column after normalization.
pub const C_COL_COMPANY_NORM: &str = "Compania";
/// Requisition type column.
pub const C_COL_TYPE: &str = "Tipo";
/// Derived time-bucket column.
pub const C_COL_ELAPSED: &str = "Tiempo";
/// Justification column (unaccented spelling as sometimes received).
pub const C_COL_JUSTIFICATION_RAW: &str = "Justificacion";
/// Justification column.
pub const C_COL_JUSTIFICATION: &str = "Justificación";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Labels

/// Grand-total label closing a grouped table.
pub const C_LABEL_GRAND_TOTAL: &str = "Total General";
/// Prefix of a group subtotal label.
pub const C_LABEL_SUBTOTAL_PREFIX: &str = "Total ";
/// Total row label of a pivot table.
pub const C_LABEL_TOTAL: &str = "Total";
/// Placeholder category added to single-category pivot tables.
pub const C_LABEL_PLACEHOLDER: &str = "(Otra categoría sin datos)";
/// Value header of formula blocks.
pub const C_LABEL_REQUESTED_SUM: &str = "Suma de Solicitados";
/// Total label of formula blocks.
pub const C_LABEL_FORMULA_TOTAL: &str = "Suma total";
/// Value header of the analyst sheet.
pub const C_LABEL_PENDING_SUM: &str = "Suma de Pendientes";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetsAndFiles

pub const C_SHEET_REQUISITIONS: &str = "Requisiciones";
pub const C_SHEET_ANALYST: &str = "Analista";
pub const C_SHEET_COMPANIES: &str = "Empresas";
pub const C_SHEET_PSYCHOLOGIST_SUMMARY: &str = "Resumen psicólogo";
pub const C_SHEET_PSYCHOLOGIST_SUMMARY_FORMATTED: &str = "Resumen Psicólogo";
pub const C_SHEET_DYNAMIC_SUMMARY: &str = "Resumen Dinamico";

pub const C_FILE_PSYCHOLOGIST_REPORT: &str = "reporte_analitico_psicologos.xlsx";
pub const C_FILE_DYNAMIC_SUMMARY: &str = "Reporte_General_Completo.xlsx";
pub const C_FILE_FORMATTED_REPORT: &str = "Reporte_General_Formateado.xlsx";

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Layout

/// Zero-based anchor row of the first pivot table (`E2`).
pub const N_ROW_PIVOT_ANCHOR: usize = 1;
/// Zero-based anchor column of the pivot tables (`E`).
pub const N_COL_PIVOT_ANCHOR: usize = 4;
/// Row step between stacked pivot tables beyond their category rows.
///
/// Header + total + two blank rows. Downstream chart positions depend on it.
pub const N_ROWS_PIVOT_STEP_EXTRA: usize = 4;
/// Zero-based chart anchor column (`H`).
pub const N_COL_CHART_ANCHOR: usize = 7;
/// Zero-based anchor row of the first chart (`H2`).
pub const N_ROW_CHART_ANCHOR: usize = 1;
/// Row step between stacked charts (`H2`, `H15`).
pub const N_ROWS_CHART_STEP: usize = 13;
/// Doughnut chart width in pixels (eight default columns, `H:O`).
pub const N_PX_CHART_WIDTH: u32 = 480;
/// Doughnut chart height in pixels (twelve default rows, under the chart step).
pub const N_PX_CHART_HEIGHT: u32 = 240;
/// Number format of doughnut percentage labels (zero slices hidden).
pub const C_FMT_CHART_LABEL: &str = "0%;;";

/// Zero-based header row of the first formula block (Excel row 2).
pub const N_ROW_FORMULA_ANCHOR: usize = 1;
/// Row step from a formula block's total row to the next block's header.
pub const N_ROWS_FORMULA_STEP: usize = 3;

/// Words per line when reflowing justification text.
pub const N_WORDS_PER_LINE_JUSTIFICATION: usize = 20;
/// Fixed width of the justification column.
pub const N_WIDTH_JUSTIFICATION: f64 = 60.0;

/// Autofit padding on the analytic report's detail sheet.
pub const N_WIDTH_PADDING_ANALYTIC: usize = 3;
/// Autofit padding on the general reports.
pub const N_WIDTH_PADDING_GENERAL: usize = 2;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Styles

/// Explicit style presets shared by the report sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportStyles {
    /// Table header and grand-total cells.
    pub fmt_header: SpecCellFormat,
    /// Group subtotal cells.
    pub fmt_total: SpecCellFormat,
    /// Reflowed long-text cells.
    pub fmt_wrap_top: SpecCellFormat,
}

/// Build the default report style presets.
pub fn derive_report_styles() -> SpecReportStyles {
    SpecReportStyles {
        fmt_header: SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#DDEBF7".to_string()),
            border: Some(1),
            ..Default::default()
        },
        fmt_total: SpecCellFormat {
            bold: Some(true),
            bg_color: Some("#F2F2F2".to_string()),
            ..Default::default()
        },
        fmt_wrap_top: SpecCellFormat {
            text_wrap: Some(true),
            valign: Some("top".to_string()),
            ..Default::default()
        },
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
