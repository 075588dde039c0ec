//! `reqkit_io_xlsx` v1:
//! Rust-side XLSX writer kernel for requisition reports.
//!
//! Modules:
//! - `conf`   : Excel limits and default format presets
//! - `spec`   : formats, cell values, grid regions/ranges, options
//! - `util`   : pure helper functions (A1 refs, sanitizing, conversion)
//! - `writer` : in-memory workbook writer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_MIME_XLSX, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_PX_COL_WIDTH_DEFAULT, N_PX_ROW_HEIGHT_DEFAULT, TUP_EXCEL_ILLEGAL,
    derive_default_xlsx_formats,
};
pub use spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecCellRange, SpecDoughnutChart,
    SpecSheetRegion, SpecXlsxReport,
};
pub use util::{
    convert_cell_value, derive_column_letter, derive_sheet_ref, escape_formula_text,
    is_region_overlap, sanitize_sheet_name,
};
pub use writer::{
    SpecXlsxSheetWriteOptions, XlsxWriter, derive_chart_region, derive_rust_xlsx_format,
};
