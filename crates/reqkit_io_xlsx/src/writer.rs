//! XLSX writer kernel that lays DataFrames, tables, formulas and charts onto
//! an in-memory workbook.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartType, Format, FormatAlign, FormatBorder, Formula, Workbook,
    Worksheet, XlsxError,
};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_PX_COL_WIDTH_DEFAULT,
    N_PX_ROW_HEIGHT_DEFAULT, derive_default_xlsx_formats,
};
use crate::spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecDoughnutChart, SpecSheetRegion,
    SpecXlsxReport,
};
use crate::util::{
    convert_cell_value, is_region_overlap, sanitize_sheet_name, validate_unique_columns,
};

/// Per-sheet call options for [`XlsxWriter::write_sheet_from_dataframe`].
#[derive(Default, Debug, Clone)]
pub struct SpecXlsxSheetWriteOptions {
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Body format overrides by column name (merged over the planned format).
    pub cols_fmt_overrides: BTreeMap<String, SpecCellFormat>,
    /// Fixed widths by column name; these columns skip autofit.
    pub cols_width_fixed: BTreeMap<String, f64>,
}

pub struct SpecColumnFormatPlanOptions<'a> {
    /// Number of columns in current sheet.
    pub width_data: usize,
    /// Numeric column indices.
    pub cols_idx_numeric: &'a [usize],
    /// Integer column indices.
    pub cols_idx_integer: &'a [usize],
    /// Optional per-column format overrides.
    pub cols_fmt_overrides: &'a BTreeMap<usize, SpecCellFormat>,
    /// Base text format.
    pub fmt_text: &'a SpecCellFormat,
    /// Base integer format.
    pub fmt_integer: &'a SpecCellFormat,
    /// Base decimal format.
    pub fmt_decimal: &'a SpecCellFormat,
}

/// Stateful in-memory workbook writer.
///
/// Sheets are created through [`Self::add_sheet`] or
/// [`Self::write_sheet_from_dataframe`] and addressed afterwards by the
/// returned (sanitized, unique) name. [`Self::close`] consumes the writer and
/// returns the finished workbook bytes.
pub struct XlsxWriter {
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_integer: SpecCellFormat,
    fmt_decimal: SpecCellFormat,
    fmt_header: SpecCellFormat,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
}

impl XlsxWriter {
    /// Create writer bound to format/options presets.
    pub fn new(
        fmt_text: SpecCellFormat,
        fmt_integer: SpecCellFormat,
        fmt_decimal: SpecCellFormat,
        fmt_header: SpecCellFormat,
    ) -> Self {
        Self {
            workbook: Workbook::new(),
            fmt_text,
            fmt_integer,
            fmt_decimal,
            fmt_header,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
        }
    }

    /// Create writer from [`derive_default_xlsx_formats`] presets.
    pub fn with_default_formats() -> Result<Self, String> {
        let dict_default_fmts = derive_default_xlsx_formats();
        let derive_preset = |key: &str| {
            dict_default_fmts
                .get(key)
                .cloned()
                .ok_or_else(|| format!("Missing default format: {key}"))
        };
        Ok(Self::new(
            derive_preset("text")?,
            derive_preset("integer")?,
            derive_preset("decimal")?,
            derive_preset("header")?,
        ))
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Serialize the workbook into XLSX bytes.
    pub fn close(mut self) -> Result<Vec<u8>, String> {
        self.workbook
            .save_to_buffer()
            .map_err(derive_xlsx_error_text)
    }

    /// Append an empty worksheet and return its actual name.
    pub fn add_sheet(&mut self, sheet_name: &str) -> Result<String, String> {
        let sheet_name_unique = self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;
        self.l_reports.push(SpecXlsxReport {
            sheet_name: sheet_name_unique.clone(),
            ..Default::default()
        });
        Ok(sheet_name_unique)
    }

    /// Reserve a rectangular region; fails when it overlaps an earlier one.
    pub fn claim_region(&mut self, region: SpecSheetRegion) -> Result<(), String> {
        let report = self.derive_report_mut(&region.sheet_name)?;
        if let Some(region_existing) = report
            .regions
            .iter()
            .find(|region_existing| is_region_overlap(region_existing, &region))
        {
            return Err(format!(
                "Region overlap on sheet {:?}: rows {}..={} cols {}..={} collide with rows {}..={} cols {}..={}",
                region.sheet_name,
                region.row_start,
                region.row_end(),
                region.col_start,
                region.col_end(),
                region_existing.row_start,
                region_existing.row_end(),
                region_existing.col_start,
                region_existing.col_end(),
            ));
        }
        report.regions.push(region);
        Ok(())
    }

    /// Write consecutive cells of one row starting at `(row_idx, col_idx)`.
    pub fn write_row(
        &mut self,
        sheet_name: &str,
        row_idx: usize,
        col_idx: usize,
        values: &[EnumCellValue],
        format: Option<&Format>,
    ) -> Result<(), String> {
        let worksheet = self.derive_worksheet_mut(sheet_name)?;
        for (n_offset, value) in values.iter().enumerate() {
            write_cell_with_format(worksheet, row_idx, col_idx + n_offset, value, format)?;
        }
        Ok(())
    }

    /// Write a single cell.
    pub fn write_cell(
        &mut self,
        sheet_name: &str,
        row_idx: usize,
        col_idx: usize,
        value: &EnumCellValue,
        format: Option<&Format>,
    ) -> Result<(), String> {
        let worksheet = self.derive_worksheet_mut(sheet_name)?;
        write_cell_with_format(worksheet, row_idx, col_idx, value, format)
    }

    /// Write a formula cell (`formula` includes the leading `=`).
    pub fn write_formula(
        &mut self,
        sheet_name: &str,
        row_idx: usize,
        col_idx: usize,
        formula: &str,
        format: Option<&Format>,
    ) -> Result<(), String> {
        let worksheet = self.derive_worksheet_mut(sheet_name)?;
        let row = cast_row_num(row_idx)?;
        let col = cast_col_num(col_idx)?;
        match format {
            Some(fmt) => worksheet.write_formula_with_format(row, col, Formula::new(formula), fmt),
            None => worksheet.write_formula(row, col, Formula::new(formula)),
        }
        .map_err(derive_xlsx_error_text)?;
        Ok(())
    }

    /// Set explicit column widths as `(col_idx, width)` pairs.
    pub fn set_column_widths(
        &mut self,
        sheet_name: &str,
        widths: &[(usize, f64)],
    ) -> Result<(), String> {
        let worksheet = self.derive_worksheet_mut(sheet_name)?;
        for (col_idx, width) in widths {
            worksheet
                .set_column_width(cast_col_num(*col_idx)?, *width)
                .map_err(derive_xlsx_error_text)?;
        }
        Ok(())
    }

    /// Insert a doughnut chart with its top-left corner at `(row_idx, col_idx)`.
    ///
    /// The chart's cell extent is claimed like a table region, so a chart
    /// running into another table or chart is rejected.
    pub fn insert_doughnut_chart(
        &mut self,
        sheet_name: &str,
        row_idx: usize,
        col_idx: usize,
        spec: &SpecDoughnutChart,
    ) -> Result<(), String> {
        self.claim_region(derive_chart_region(sheet_name, row_idx, col_idx, spec))?;

        let c_range_categories = spec.range_categories.to_formula_ref();
        let c_range_values = spec.range_values.to_formula_ref();

        let mut chart = Chart::new(ChartType::Doughnut);
        chart
            .add_series()
            .set_name(spec.series_name.as_str())
            .set_categories(c_range_categories.as_str())
            .set_values(c_range_values.as_str())
            .set_data_label(
                ChartDataLabel::new()
                    .show_percentage()
                    .show_leader_lines()
                    .set_num_format(spec.label_num_format.as_str()),
            );
        chart.title().set_name(spec.title.as_str());
        chart.set_width(spec.width_px).set_height(spec.height_px);

        let worksheet = self.derive_worksheet_mut(sheet_name)?;
        worksheet
            .insert_chart(cast_row_num(row_idx)?, cast_col_num(col_idx)?, &chart)
            .map_err(derive_xlsx_error_text)?;

        self.derive_report_mut(sheet_name)?.cnt_charts += 1;
        Ok(())
    }

    /// Record a non-fatal warning against a sheet.
    pub fn warn(&mut self, sheet_name: &str, msg: impl AsRef<str>) -> Result<(), String> {
        self.derive_report_mut(sheet_name)?.warn(msg);
        Ok(())
    }

    /// Write one sheet (header row + body) from an in-memory dataframe.
    ///
    /// Returns the actual sheet name.
    pub fn write_sheet_from_dataframe(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<String, String> {
        validate_policy_autofit(&options.policy_autofit)?;

        let l_colnames_df: Vec<String> = df_data
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames_df)?;

        let n_width_df = l_colnames_df.len();
        let n_height_df = df_data.height();
        if n_width_df > N_NCOLS_EXCEL_MAX {
            return Err(format!(
                "DataFrame too wide: {n_width_df} columns exceeds Excel limit {N_NCOLS_EXCEL_MAX}."
            ));
        }
        if n_height_df + 1 > N_NROWS_EXCEL_MAX {
            return Err(format!(
                "DataFrame too tall: {n_height_df} rows exceeds Excel limit {}.",
                N_NROWS_EXCEL_MAX - 1
            ));
        }

        let l_cols_idx_numeric = derive_numeric_column_indices(df_data);
        let l_cols_idx_integer = derive_integer_column_indices(df_data, &l_cols_idx_numeric);

        let dict_fmt_overrides = derive_indices_by_name(&l_colnames_df, &options.cols_fmt_overrides)?;
        let dict_width_fixed = derive_indices_by_name(&l_colnames_df, &options.cols_width_fixed)?;

        let l_fmts_by_col = plan_column_formats(SpecColumnFormatPlanOptions {
            width_data: n_width_df,
            cols_idx_numeric: &l_cols_idx_numeric,
            cols_idx_integer: &l_cols_idx_integer,
            cols_fmt_overrides: &dict_fmt_overrides,
            fmt_text: &self.fmt_text,
            fmt_integer: &self.fmt_integer,
            fmt_decimal: &self.fmt_decimal,
        });
        let l_fmt_data_by_col: Vec<Format> = l_fmts_by_col
            .iter()
            .map(derive_rust_xlsx_format)
            .collect();
        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);

        let sheet_name_unique = self.add_sheet(sheet_name)?;
        self.claim_region(SpecSheetRegion {
            sheet_name: sheet_name_unique.clone(),
            row_start: 0,
            col_start: 0,
            n_rows: n_height_df + 1,
            n_cols: n_width_df,
        })?;

        let mut l_width_by_col = vec![0usize; n_width_df];

        let worksheet = self
            .workbook
            .worksheet_from_name(&sheet_name_unique)
            .map_err(derive_xlsx_error_text)?;

        for (n_idx_col, c_name) in l_colnames_df.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col)?, c_name, &fmt_header)
                .map_err(derive_xlsx_error_text)?;
            l_width_by_col[n_idx_col] = estimate_unicode_string_width(c_name);
        }

        let set_cols_idx_numeric: BTreeSet<usize> = l_cols_idx_numeric.iter().copied().collect();
        let set_cols_idx_integer: BTreeSet<usize> = l_cols_idx_integer.iter().copied().collect();

        for (n_idx_col, col) in df_data.get_columns().iter().enumerate() {
            let if_is_numeric_col = set_cols_idx_numeric.contains(&n_idx_col);
            let if_is_integer_col = set_cols_idx_integer.contains(&n_idx_col);

            for n_row_local in 0..n_height_df {
                let value_raw = derive_cell_value_from_any_value(
                    col.get(n_row_local)
                        .map_err(|err| format!("Failed to access cell value: {err}"))?,
                );
                let value = convert_cell_value(&value_raw, if_is_numeric_col, if_is_integer_col);
                l_width_by_col[n_idx_col] =
                    usize::max(l_width_by_col[n_idx_col], estimate_width_len(&value));

                write_cell_with_format(
                    worksheet,
                    1 + n_row_local,
                    n_idx_col,
                    &value,
                    Some(&l_fmt_data_by_col[n_idx_col]),
                )?;
            }
        }

        let n_min = usize::max(1, options.policy_autofit.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, options.policy_autofit.width_cell_max));
        let n_pad = options.policy_autofit.width_cell_padding;

        for n_idx_col in 0..n_width_df {
            if let Some(n_width_fixed) = dict_width_fixed.get(&n_idx_col) {
                worksheet
                    .set_column_width(cast_col_num(n_idx_col)?, *n_width_fixed)
                    .map_err(derive_xlsx_error_text)?;
                continue;
            }
            let n_width_final =
                usize::min(n_max, usize::max(n_min, l_width_by_col[n_idx_col] + n_pad));
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                .map_err(derive_xlsx_error_text)?;
        }

        Ok(sheet_name_unique)
    }

    fn derive_worksheet_mut(&mut self, sheet_name: &str) -> Result<&mut Worksheet, String> {
        self.workbook
            .worksheet_from_name(sheet_name)
            .map_err(derive_xlsx_error_text)
    }

    fn derive_report_mut(&mut self, sheet_name: &str) -> Result<&mut SpecXlsxReport, String> {
        self.l_reports
            .iter_mut()
            .find(|report| report.sheet_name == sheet_name)
            .ok_or_else(|| format!("Unknown sheet: {sheet_name:?}"))
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Estimate displayed width units for one normalized cell value.
///
/// Used by autofit inference logic.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::String(s) => estimate_unicode_string_width(s),
        EnumCellValue::Number(n) if n.fract() == 0.0 => (*n as i64).to_string().len(),
        EnumCellValue::Number(n) => n.to_string().len(),
    }
}

fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Plan the body format of every column: integer, decimal or text base,
/// with the column's override merged on top.
pub fn plan_column_formats(options: SpecColumnFormatPlanOptions<'_>) -> Vec<SpecCellFormat> {
    let SpecColumnFormatPlanOptions {
        width_data,
        cols_idx_numeric,
        cols_idx_integer,
        cols_fmt_overrides,
        fmt_text,
        fmt_integer,
        fmt_decimal,
    } = options;

    (0..width_data)
        .map(|col_idx| {
            let fmt_base = if cols_idx_integer.contains(&col_idx) {
                fmt_integer
            } else if cols_idx_numeric.contains(&col_idx) {
                fmt_decimal
            } else {
                fmt_text
            };
            match cols_fmt_overrides.get(&col_idx) {
                Some(fmt_override) => fmt_base.merge(fmt_override),
                None => fmt_base.clone(),
            }
        })
        .collect()
}

/// Cell extent of a chart, assuming default row heights and column widths.
pub fn derive_chart_region(
    sheet_name: &str,
    row_idx: usize,
    col_idx: usize,
    spec: &SpecDoughnutChart,
) -> SpecSheetRegion {
    SpecSheetRegion {
        sheet_name: sheet_name.to_string(),
        row_start: row_idx,
        col_start: col_idx,
        n_rows: (spec.height_px as usize).div_ceil(N_PX_ROW_HEIGHT_DEFAULT),
        n_cols: (spec.width_px as usize).div_ceil(N_PX_COL_WIDTH_DEFAULT),
    }
}

fn derive_indices_by_name<T: Clone>(
    columns: &[String],
    dict_by_name: &BTreeMap<String, T>,
) -> Result<BTreeMap<usize, T>, String> {
    let mut dict_by_idx = BTreeMap::new();
    for (c_name, value) in dict_by_name {
        let Some(n_idx) = columns.iter().position(|c_col| c_col == c_name) else {
            return Err(format!("Column not found: {c_name:?}"));
        };
        dict_by_idx.insert(n_idx, value.clone());
    }
    Ok(dict_by_idx)
}

fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), String> {
    if policy_autofit.width_cell_min == 0 {
        return Err("policy_autofit.width_cell_min must be >= 1.".to_string());
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        );
    }
    Ok(())
}

fn derive_numeric_column_indices(df: &DataFrame) -> Vec<usize> {
    df.get_columns()
        .iter()
        .enumerate()
        .filter_map(|(n_idx, c_col)| {
            if c_col.dtype().is_numeric() {
                Some(n_idx)
            } else {
                None
            }
        })
        .collect()
}

fn derive_integer_column_indices(df: &DataFrame, cols_idx_numeric: &[usize]) -> Vec<usize> {
    cols_idx_numeric
        .iter()
        .copied()
        .filter(|n_idx| df.get_columns()[*n_idx].dtype().is_integer())
        .collect()
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: Option<&Format>,
) -> Result<(), String> {
    let row = cast_row_num(row_idx)?;
    let col = cast_col_num(col_idx)?;
    match (value, format) {
        (EnumCellValue::None, Some(fmt)) => {
            worksheet
                .write_blank(row, col, fmt)
                .map_err(derive_xlsx_error_text)?;
        }
        (EnumCellValue::None, None) => {}
        (EnumCellValue::String(val), Some(fmt)) => {
            worksheet
                .write_string_with_format(row, col, val, fmt)
                .map_err(derive_xlsx_error_text)?;
        }
        (EnumCellValue::String(val), None) => {
            worksheet
                .write_string(row, col, val)
                .map_err(derive_xlsx_error_text)?;
        }
        (EnumCellValue::Number(val), Some(fmt)) => {
            worksheet
                .write_number_with_format(row, col, *val, fmt)
                .map_err(derive_xlsx_error_text)?;
        }
        (EnumCellValue::Number(val), None) => {
            worksheet
                .write_number(row, col, *val)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

/// Convert a [`SpecCellFormat`] into a `rust_xlsxwriter` format.
pub fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
