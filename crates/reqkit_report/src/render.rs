//! Layout of planned tables, charts and formula blocks onto worksheets.

use reqkit_io_xlsx::{
    EnumCellValue, SpecDoughnutChart, SpecSheetRegion, XlsxWriter, derive_rust_xlsx_format,
};
use rust_xlsxwriter::Format;
use tracing::{debug, warn};

use crate::conf::{
    C_FMT_CHART_LABEL, C_LABEL_TOTAL, N_COL_CHART_ANCHOR, N_PX_CHART_HEIGHT, N_PX_CHART_WIDTH,
    N_ROW_CHART_ANCHOR, N_ROWS_CHART_STEP, SpecReportStyles,
};
use crate::formula::derive_block_header;
use crate::spec::{
    EnumGroupedRowKind, ReportError, SpecFormulaBlock, SpecGroupedTable, SpecPivotPlacement,
};

/// Compiled report styles, built once per workbook.
pub struct SpecReportFormats {
    pub fmt_header: Format,
    pub fmt_total: Format,
}

impl SpecReportFormats {
    pub fn from_styles(styles: &SpecReportStyles) -> Self {
        Self {
            fmt_header: derive_rust_xlsx_format(&styles.fmt_header),
            fmt_total: derive_rust_xlsx_format(&styles.fmt_total),
        }
    }
}

/// Title and series name of a pivot-fed doughnut chart.
#[derive(Debug, Clone, Copy)]
pub struct SpecChartLabels<'a> {
    pub title: &'a str,
    pub series_name: &'a str,
}

/// Write a grouped table at `A1`: header, detail, subtotal and grand-total rows.
pub fn write_grouped_table(
    writer: &mut XlsxWriter,
    sheet_name: &str,
    headers: [&str; 3],
    table: &SpecGroupedTable,
    formats: &SpecReportFormats,
) -> Result<(), ReportError> {
    writer
        .claim_region(SpecSheetRegion {
            sheet_name: sheet_name.to_string(),
            row_start: 0,
            col_start: 0,
            n_rows: table.rows.len() + 1,
            n_cols: headers.len(),
        })
        .map_err(ReportError::Internal)?;

    writer
        .write_row(
            sheet_name,
            0,
            0,
            &headers.map(EnumCellValue::from),
            Some(&formats.fmt_header),
        )
        .map_err(ReportError::Internal)?;

    for (n_offset, row) in table.rows.iter().enumerate() {
        let n_row = n_offset + 1;
        let fmt_row = match row.kind {
            EnumGroupedRowKind::Detail => {
                writer
                    .write_row(
                        sheet_name,
                        n_row,
                        0,
                        &[
                            EnumCellValue::from(row.outer.as_str()),
                            EnumCellValue::from(row.inner.as_str()),
                            EnumCellValue::from(row.total),
                        ],
                        None,
                    )
                    .map_err(ReportError::Internal)?;
                continue;
            }
            EnumGroupedRowKind::Subtotal => &formats.fmt_total,
            EnumGroupedRowKind::GrandTotal => &formats.fmt_header,
        };
        writer
            .write_cell(sheet_name, n_row, 0, &EnumCellValue::from(row.label()), Some(fmt_row))
            .map_err(ReportError::Internal)?;
        writer
            .write_cell(sheet_name, n_row, 2, &EnumCellValue::from(row.total), Some(fmt_row))
            .map_err(ReportError::Internal)?;
    }
    Ok(())
}

/// Write one placed summary table: header, category rows, total row.
pub fn write_pivot_placement(
    writer: &mut XlsxWriter,
    sheet_name: &str,
    placement: &SpecPivotPlacement,
    formats: &SpecReportFormats,
) -> Result<(), ReportError> {
    writer
        .claim_region(placement.region(sheet_name))
        .map_err(ReportError::Internal)?;

    let n_col = placement.col_start;
    writer
        .write_row(
            sheet_name,
            placement.row_start,
            n_col,
            &[
                EnumCellValue::from(placement.header_category.as_str()),
                EnumCellValue::from(placement.header_value.as_str()),
            ],
            Some(&formats.fmt_header),
        )
        .map_err(ReportError::Internal)?;
    for (n_offset, row) in placement.rows.iter().enumerate() {
        writer
            .write_row(
                sheet_name,
                placement.row_start + 1 + n_offset,
                n_col,
                &[EnumCellValue::from(row.category.as_str()), EnumCellValue::from(row.total)],
                None,
            )
            .map_err(ReportError::Internal)?;
    }
    writer
        .write_row(
            sheet_name,
            placement.row_total(),
            n_col,
            &[EnumCellValue::from(C_LABEL_TOTAL), EnumCellValue::from(placement.total)],
            None,
        )
        .map_err(ReportError::Internal)?;
    Ok(())
}

/// Insert the `idx_chart`-th doughnut chart fed by `placement`.
///
/// Tables without categories get no chart; a warning is recorded instead.
/// Returns whether a chart was inserted.
pub fn insert_pivot_chart(
    writer: &mut XlsxWriter,
    sheet_name: &str,
    placement: &SpecPivotPlacement,
    idx_chart: usize,
    labels: SpecChartLabels<'_>,
) -> Result<bool, ReportError> {
    let (Some(range_categories), Some(range_values)) = (
        placement.range_categories(sheet_name),
        placement.range_values(sheet_name),
    ) else {
        let c_msg = format!("Chart {:?} skipped: table has no categories", labels.title);
        warn!(sheet = sheet_name, chart = labels.title, "chart skipped: no categories");
        writer.warn(sheet_name, c_msg).map_err(ReportError::Internal)?;
        return Ok(false);
    };

    let n_row_chart = N_ROW_CHART_ANCHOR + N_ROWS_CHART_STEP * idx_chart;
    debug!(
        sheet = sheet_name,
        chart = labels.title,
        categories = %range_categories.to_formula_ref(),
        values = %range_values.to_formula_ref(),
        "inserting doughnut chart"
    );
    writer
        .insert_doughnut_chart(
            sheet_name,
            n_row_chart,
            N_COL_CHART_ANCHOR,
            &SpecDoughnutChart {
                title: labels.title.to_string(),
                series_name: labels.series_name.to_string(),
                range_categories,
                range_values,
                label_num_format: C_FMT_CHART_LABEL.to_string(),
                width_px: N_PX_CHART_WIDTH,
                height_px: N_PX_CHART_HEIGHT,
            },
        )
        .map_err(ReportError::Internal)?;
    Ok(true)
}

/// Write a formula block in columns `A:B`.
pub fn write_formula_block(
    writer: &mut XlsxWriter,
    sheet_name: &str,
    block: &SpecFormulaBlock,
) -> Result<(), ReportError> {
    writer
        .claim_region(SpecSheetRegion {
            sheet_name: sheet_name.to_string(),
            row_start: block.row_header,
            col_start: 0,
            n_rows: block.rows.len() + 2,
            n_cols: 2,
        })
        .map_err(ReportError::Internal)?;

    writer
        .write_row(
            sheet_name,
            block.row_header,
            0,
            &derive_block_header(block).map(EnumCellValue::from),
            None,
        )
        .map_err(ReportError::Internal)?;

    let l_rows = block.rows.iter().chain(std::iter::once(&block.total));
    for (n_offset, row) in l_rows.enumerate() {
        let n_row = block.row_header + 1 + n_offset;
        writer
            .write_cell(sheet_name, n_row, 0, &EnumCellValue::from(row.label.as_str()), None)
            .map_err(ReportError::Internal)?;
        writer
            .write_formula(sheet_name, n_row, 1, &row.formula, None)
            .map_err(ReportError::Internal)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::derive_report_styles;
    use crate::spec::{SpecFormulaRow, SpecGroupedRow, SpecSummaryRow};

    fn writer_with_sheet(name: &str) -> (XlsxWriter, String) {
        let mut writer = XlsxWriter::with_default_formats().expect("writer");
        let sheet = writer.add_sheet(name).expect("sheet");
        (writer, sheet)
    }

    fn placement(l_rows: &[(&str, i64)], row_start: usize) -> SpecPivotPlacement {
        SpecPivotPlacement {
            header_category: "Tipo".to_string(),
            header_value: "Total".to_string(),
            rows: l_rows
                .iter()
                .map(|(category, total)| SpecSummaryRow {
                    category: category.to_string(),
                    total: *total,
                })
                .collect(),
            total: l_rows.iter().map(|(_, total)| total).sum(),
            row_start,
            col_start: 4,
            if_placeholder_added: false,
        }
    }

    #[test]
    fn test_write_grouped_table_claims_region() {
        let (mut writer, sheet) = writer_with_sheet("Analista");
        let formats = SpecReportFormats::from_styles(&derive_report_styles());
        let table = SpecGroupedTable {
            rows: vec![
                SpecGroupedRow {
                    kind: EnumGroupedRowKind::Detail,
                    outer: "Ana".to_string(),
                    inner: "X".to_string(),
                    total: 3,
                },
                SpecGroupedRow {
                    kind: EnumGroupedRowKind::Subtotal,
                    outer: "Ana".to_string(),
                    inner: String::new(),
                    total: 3,
                },
                SpecGroupedRow {
                    kind: EnumGroupedRowKind::GrandTotal,
                    outer: String::new(),
                    inner: String::new(),
                    total: 3,
                },
            ],
        };
        write_grouped_table(
            &mut writer,
            &sheet,
            ["Psicólogo", "Compañía", "Suma de Pendientes"],
            &table,
            &formats,
        )
        .expect("grouped");
        let report = &writer.report()[0];
        assert_eq!(report.regions[0].n_rows, 4);
        assert_eq!(report.regions[0].n_cols, 3);
    }

    #[test]
    fn test_pivot_overlapping_grouped_table_is_rejected() {
        let (mut writer, sheet) = writer_with_sheet("Empresas");
        let formats = SpecReportFormats::from_styles(&derive_report_styles());
        let mut overlapping = placement(&[("A", 1), ("B", 2)], 1);
        overlapping.col_start = 2;
        writer
            .claim_region(SpecSheetRegion {
                sheet_name: sheet.clone(),
                row_start: 0,
                col_start: 0,
                n_rows: 5,
                n_cols: 3,
            })
            .expect("grouped region");
        let err = write_pivot_placement(&mut writer, &sheet, &overlapping, &formats).unwrap_err();
        assert!(err.to_string().contains("Region overlap"));
    }

    #[test]
    fn test_insert_pivot_chart_skips_empty_table() {
        let (mut writer, sheet) = writer_with_sheet("Empresas");
        let formats = SpecReportFormats::from_styles(&derive_report_styles());
        let labels = SpecChartLabels {
            title: "Tipo de proceso",
            series_name: "Resumen por Tipo",
        };

        let empty = placement(&[], 1);
        write_pivot_placement(&mut writer, &sheet, &empty, &formats).expect("empty table");
        assert!(!insert_pivot_chart(&mut writer, &sheet, &empty, 0, labels).expect("skip"));

        let filled = placement(&[("A", 1), ("B", 2)], 6);
        write_pivot_placement(&mut writer, &sheet, &filled, &formats).expect("table");
        assert!(insert_pivot_chart(&mut writer, &sheet, &filled, 1, labels).expect("chart"));

        let report = &writer.report()[0];
        assert_eq!(report.cnt_charts, 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_write_formula_block_rows() {
        let (mut writer, sheet) = writer_with_sheet("Resumen Dinamico");
        let block = SpecFormulaBlock {
            column: "Tipo".to_string(),
            row_header: 1,
            rows: vec![SpecFormulaRow {
                label: "Nuevo".to_string(),
                formula: r#"=COUNTIF(Requisiciones!C:C, "Nuevo")"#.to_string(),
            }],
            total: SpecFormulaRow {
                label: "Suma total".to_string(),
                formula: "=SUM(B3:B3)".to_string(),
            },
        };
        write_formula_block(&mut writer, &sheet, &block).expect("block");
        let report = &writer.report()[0];
        assert_eq!(report.regions[0].row_end(), block.row_total());
    }
}
