//! Report recipes: each one turns request records into a named workbook.

use std::time::Instant;

use reqkit_io_xlsx::{SpecAutofitCellsPolicy, SpecXlsxSheetWriteOptions, XlsxWriter};
use tracing::info;

use crate::aggregate::aggregate_sum;
use crate::conf::{
    C_COL_ANALYST, C_COL_ANALYST_NORM, C_COL_COMPANY, C_COL_COMPANY_NORM, C_COL_ELAPSED,
    C_COL_JUSTIFICATION, C_COL_PENDING, C_COL_STATUS, C_COL_TYPE, C_FILE_DYNAMIC_SUMMARY,
    C_FILE_FORMATTED_REPORT, C_FILE_PSYCHOLOGIST_REPORT, C_LABEL_PENDING_SUM, C_LABEL_TOTAL,
    C_SHEET_ANALYST, C_SHEET_COMPANIES, C_SHEET_DYNAMIC_SUMMARY, C_SHEET_PSYCHOLOGIST_SUMMARY,
    C_SHEET_PSYCHOLOGIST_SUMMARY_FORMATTED, C_SHEET_REQUISITIONS, N_COL_PIVOT_ANCHOR,
    N_ROW_FORMULA_ANCHOR, N_ROW_PIVOT_ANCHOR, N_WIDTH_JUSTIFICATION, N_WIDTH_PADDING_ANALYTIC,
    N_WIDTH_PADDING_GENERAL, N_WORDS_PER_LINE_JUSTIFICATION, derive_report_styles,
};
use crate::formula::plan_formula_summary;
use crate::frame::derive_dataframe_from_table;
use crate::normalize::normalize_requisitions;
use crate::pivot::{derive_summary_table, plan_pivot_layout};
use crate::reflow::apply_justification_reflow;
use crate::render::{
    SpecChartLabels, SpecReportFormats, insert_pivot_chart, write_formula_block,
    write_grouped_table, write_pivot_placement,
};
use crate::spec::{Record, ReportError, SpecRecordTable, SpecReportArtifact};
use crate::subtotal::build_grouped_subtotal_table;

const TUP_CHART_LABELS: [SpecChartLabels<'static>; 2] = [
    SpecChartLabels {
        title: "Tipo de proceso",
        series_name: "Resumen por Tipo",
    },
    SpecChartLabels {
        title: "Tiempo Transcurrido",
        series_name: "Resumen por Tiempo",
    },
];

fn new_writer() -> Result<XlsxWriter, ReportError> {
    XlsxWriter::with_default_formats().map_err(ReportError::Internal)
}

fn derive_sheet_options(n_padding: usize) -> SpecXlsxSheetWriteOptions {
    SpecXlsxSheetWriteOptions {
        policy_autofit: SpecAutofitCellsPolicy {
            width_cell_padding: n_padding,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn write_table_sheet(
    writer: &mut XlsxWriter,
    table: &SpecRecordTable,
    sheet_name: &str,
    options: &SpecXlsxSheetWriteOptions,
) -> Result<String, ReportError> {
    let df = derive_dataframe_from_table(table)?;
    writer
        .write_sheet_from_dataframe(&df, sheet_name, options)
        .map_err(ReportError::Internal)
}

fn finish_report(
    writer: XlsxWriter,
    file_name: &str,
    t_start: Instant,
) -> Result<SpecReportArtifact, ReportError> {
    let sheets = writer.report();
    let bytes = writer.close().map_err(ReportError::Internal)?;
    for sheet in &sheets {
        for c_warning in &sheet.warnings {
            tracing::warn!(report = file_name, sheet = %sheet.sheet_name, "{c_warning}");
        }
    }
    info!(
        report = file_name,
        sheets = sheets.len(),
        bytes = bytes.len(),
        elapsed_ms = (t_start.elapsed().as_millis() as u64),
        "workbook generated"
    );
    Ok(SpecReportArtifact {
        file_name: file_name.to_string(),
        bytes,
        sheets,
    })
}

/// Analytic report: normalized detail, per-analyst and per-company grouped
/// tables, type/elapsed-time pivots with doughnut charts.
pub fn build_psychologist_report(records: Vec<Record>) -> Result<SpecReportArtifact, ReportError> {
    let t_start = Instant::now();
    let n_rows_received = records.len();
    let table = normalize_requisitions(records)?;
    info!(
        rows_received = n_rows_received,
        rows_kept = table.height(),
        "requisitions normalized"
    );

    let grouped_analyst = build_grouped_subtotal_table(&aggregate_sum(
        &table,
        &[C_COL_ANALYST_NORM, C_COL_COMPANY_NORM],
        C_COL_PENDING,
    )?);
    let grouped_company = build_grouped_subtotal_table(&aggregate_sum(
        &table,
        &[C_COL_COMPANY_NORM, C_COL_TYPE],
        C_COL_PENDING,
    )?);
    let l_placements = plan_pivot_layout(
        vec![
            derive_summary_table(&table, C_COL_TYPE, C_COL_PENDING, C_LABEL_TOTAL)?,
            derive_summary_table(&table, C_COL_ELAPSED, C_COL_PENDING, C_LABEL_TOTAL)?,
        ],
        N_ROW_PIVOT_ANCHOR,
        N_COL_PIVOT_ANCHOR,
    );

    let mut writer = new_writer()?;
    let formats = SpecReportFormats::from_styles(&derive_report_styles());

    write_table_sheet(
        &mut writer,
        &table,
        C_SHEET_REQUISITIONS,
        &derive_sheet_options(N_WIDTH_PADDING_ANALYTIC),
    )?;

    let sheet_analyst = writer.add_sheet(C_SHEET_ANALYST).map_err(ReportError::Internal)?;
    write_grouped_table(
        &mut writer,
        &sheet_analyst,
        [C_COL_ANALYST, C_COL_COMPANY, C_LABEL_PENDING_SUM],
        &grouped_analyst,
        &formats,
    )?;
    writer
        .set_column_widths(&sheet_analyst, &[(0, 30.0), (1, 45.0), (2, 20.0)])
        .map_err(ReportError::Internal)?;

    let sheet_companies = writer.add_sheet(C_SHEET_COMPANIES).map_err(ReportError::Internal)?;
    write_grouped_table(
        &mut writer,
        &sheet_companies,
        [C_COL_COMPANY, C_COL_TYPE, C_LABEL_TOTAL],
        &grouped_company,
        &formats,
    )?;
    for (idx_chart, (placement, labels)) in l_placements.iter().zip(TUP_CHART_LABELS).enumerate() {
        write_pivot_placement(&mut writer, &sheet_companies, placement, &formats)?;
        insert_pivot_chart(&mut writer, &sheet_companies, placement, idx_chart, labels)?;
    }
    writer
        .set_column_widths(
            &sheet_companies,
            &[(0, 45.0), (1, 25.0), (2, 15.0), (4, 25.0), (5, 15.0)],
        )
        .map_err(ReportError::Internal)?;

    finish_report(writer, C_FILE_PSYCHOLOGIST_REPORT, t_start)
}

/// General report: both raw tables plus COUNTIF formula blocks over the
/// requisitions sheet.
pub fn build_dynamic_summary(
    requisitions: Vec<Record>,
    psychologist_summary: Vec<Record>,
) -> Result<SpecReportArtifact, ReportError> {
    let t_start = Instant::now();
    let table_requisitions = SpecRecordTable::from_records(requisitions);
    let table_summary = SpecRecordTable::from_records(psychologist_summary);

    let mut writer = new_writer()?;
    let options = derive_sheet_options(N_WIDTH_PADDING_GENERAL);
    write_table_sheet(&mut writer, &table_summary, C_SHEET_PSYCHOLOGIST_SUMMARY, &options)?;
    let sheet_requisitions =
        write_table_sheet(&mut writer, &table_requisitions, C_SHEET_REQUISITIONS, &options)?;

    let sheet_dynamic = writer
        .add_sheet(C_SHEET_DYNAMIC_SUMMARY)
        .map_err(ReportError::Internal)?;
    let l_blocks = plan_formula_summary(
        &table_requisitions,
        &sheet_requisitions,
        &[C_COL_TYPE, C_COL_STATUS],
        N_ROW_FORMULA_ANCHOR,
    );
    info!(blocks = l_blocks.len(), "formula blocks planned");
    for block in &l_blocks {
        write_formula_block(&mut writer, &sheet_dynamic, block)?;
    }
    writer
        .set_column_widths(&sheet_dynamic, &[(0, 25.0), (1, 25.0)])
        .map_err(ReportError::Internal)?;

    finish_report(writer, C_FILE_DYNAMIC_SUMMARY, t_start)
}

/// Formatted report: raw summary plus requisitions with the justification
/// column cleaned, reflowed and wrapped.
pub fn build_formatted_report(
    psychologist_summary: Vec<Record>,
    requisitions: Vec<Record>,
) -> Result<SpecReportArtifact, ReportError> {
    let t_start = Instant::now();
    let table_summary = SpecRecordTable::from_records(psychologist_summary);
    let mut table_requisitions = SpecRecordTable::from_records(requisitions);
    let if_has_justification =
        apply_justification_reflow(&mut table_requisitions, N_WORDS_PER_LINE_JUSTIFICATION);

    let mut writer = new_writer()?;
    write_table_sheet(
        &mut writer,
        &table_summary,
        C_SHEET_PSYCHOLOGIST_SUMMARY_FORMATTED,
        &derive_sheet_options(N_WIDTH_PADDING_GENERAL),
    )?;

    let mut options_requisitions = derive_sheet_options(N_WIDTH_PADDING_GENERAL);
    if if_has_justification {
        options_requisitions
            .cols_width_fixed
            .insert(C_COL_JUSTIFICATION.to_string(), N_WIDTH_JUSTIFICATION);
        options_requisitions
            .cols_fmt_overrides
            .insert(C_COL_JUSTIFICATION.to_string(), derive_report_styles().fmt_wrap_top);
    }
    write_table_sheet(
        &mut writer,
        &table_requisitions,
        C_SHEET_REQUISITIONS,
        &options_requisitions,
    )?;

    finish_report(writer, C_FILE_FORMATTED_REPORT, t_start)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use serde_json::{Value, json};

    use super::*;
    use crate::conf::N_COL_CHART_ANCHOR;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).expect("records")
    }

    fn read_zip_entry(v_bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(v_bytes)).expect("zip archive");
        let mut entry = archive.by_name(name).expect("zip entry");
        let mut c_text = String::new();
        entry.read_to_string(&mut c_text).expect("utf8 entry");
        c_text
    }

    fn requisitions() -> Value {
        json!([
            {
                "Estado": "Abierto", "Psicólogo": "Ana", "Compañía": "X",
                "Tipo": "Nuevo", "Días": 10, "Pendientes": 2
            },
            {
                "Estado": "Abierto", "Psicólogo": "Ana", "Compañía": "Y",
                "Tipo": "Reemplazo", "Días": 30, "Pendientes": 1
            },
            {
                "Estado": "Cerrado", "Psicólogo": "Luis", "Compañía": "X",
                "Tipo": "Nuevo", "Días": 60, "Pendientes": 8
            }
        ])
    }

    #[test]
    fn test_build_psychologist_report_sheets_and_totals() {
        let artifact = build_psychologist_report(records(requisitions())).expect("report");
        assert_eq!(artifact.file_name, "reporte_analitico_psicologos.xlsx");
        assert_eq!(&artifact.bytes[..4], b"PK\x03\x04");

        let l_names: Vec<&str> = artifact.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(l_names, vec!["Requisiciones", "Analista", "Empresas"]);
        assert_eq!(artifact.sheets[2].cnt_charts, 2);
        // Grouped table, two pivot tables, two charts.
        let l_regions = &artifact.sheets[2].regions;
        assert_eq!(l_regions.len(), 5);
        let l_charts: Vec<_> = l_regions
            .iter()
            .filter(|region| region.col_start == N_COL_CHART_ANCHOR)
            .collect();
        assert_eq!(l_charts.len(), 2);
        assert_eq!((l_charts[0].row_start, l_charts[1].row_start), (1, 14));
        assert!(!reqkit_io_xlsx::is_region_overlap(l_charts[0], l_charts[1]));

        // Analista: header, 2 detail rows, 1 subtotal, grand total at row 5 (C5).
        let c_analyst = read_zip_entry(&artifact.bytes, "xl/worksheets/sheet2.xml");
        assert!(c_analyst.contains(r#"<c r="C5""#));
        let n_pos = c_analyst.find(r#"<c r="C5""#).expect("grand total cell");
        assert!(c_analyst[n_pos..].contains("<v>3</v>"));
    }

    #[test]
    fn test_build_psychologist_report_without_days_is_schema_error() {
        let err = build_psychologist_report(records(json!([
            { "Estado": "Abierto", "Pendientes": 1 }
        ])))
        .unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
    }

    #[test]
    fn test_build_dynamic_summary_writes_formulas() {
        let artifact = build_dynamic_summary(
            records(requisitions()),
            records(json!([{ "Psicólogo": "Ana", "Total": 3 }])),
        )
        .expect("report");
        assert_eq!(artifact.file_name, "Reporte_General_Completo.xlsx");
        let l_names: Vec<&str> = artifact.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(l_names, vec!["Resumen psicólogo", "Requisiciones", "Resumen Dinamico"]);
        assert_eq!(artifact.sheets[2].regions.len(), 2);

        let c_dynamic = read_zip_entry(&artifact.bytes, "xl/worksheets/sheet3.xml");
        assert!(c_dynamic.contains("COUNTIF(Requisiciones!D:D"));
        assert!(c_dynamic.contains("SUM(B3:B4)"));
    }

    #[test]
    fn test_build_formatted_report_reflows_justification() {
        let c_long = (1..=25).map(|i| format!("p{i}")).collect::<Vec<_>>().join(" ");
        let artifact = build_formatted_report(
            records(json!([{ "Psicólogo": "Ana", "Total": 3 }])),
            records(json!([
                { "Folio": 1, "Justificacion": format!("Alta - Nueva: {c_long}") }
            ])),
        )
        .expect("report");
        assert_eq!(artifact.file_name, "Reporte_General_Formateado.xlsx");
        let l_names: Vec<&str> = artifact.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(l_names, vec!["Resumen Psicólogo", "Requisiciones"]);

        let c_sheet = read_zip_entry(&artifact.bytes, "xl/worksheets/sheet2.xml");
        assert!(c_sheet.contains(r#"width="60"#));
    }
}
