//! COUNTIF/SUM formula blocks summarizing categorical columns.

use reqkit_io_xlsx::{SpecCellRange, escape_formula_text};

use crate::aggregate::derive_key_text;
use crate::conf::{C_LABEL_FORMULA_TOTAL, C_LABEL_REQUESTED_SUM, N_ROWS_FORMULA_STEP};
use crate::spec::{SpecFormulaBlock, SpecFormulaRow, SpecRecordTable};

/// Header of the value column of every block.
pub fn derive_block_header(block: &SpecFormulaBlock) -> [&str; 2] {
    [block.column.as_str(), C_LABEL_REQUESTED_SUM]
}

/// Distinct non-null values of `column`, in first-seen order.
pub fn collect_distinct_categories(table: &SpecRecordTable, column: &str) -> Vec<String> {
    let mut l_categories: Vec<String> = Vec::new();
    for record in &table.records {
        if let Some(c_value) = derive_key_text(record.get(column))
            && !l_categories.contains(&c_value)
        {
            l_categories.push(c_value);
        }
    }
    l_categories
}

/// Build one block with its header at zero-based `row_header`.
///
/// The value column is `B`; the SUM covers the category rows even when
/// there are none (`B3:B2`), matching how the sheet was always produced.
pub fn build_formula_block(
    column: &str,
    data_sheet: &str,
    data_col_idx: usize,
    categories: &[String],
    row_header: usize,
) -> SpecFormulaBlock {
    let c_column_ref = SpecCellRange {
        sheet_name: data_sheet.to_string(),
        row_start: 0,
        col_start: data_col_idx,
        row_end: 0,
        col_end: data_col_idx,
    }
    .to_column_ref();

    let rows: Vec<SpecFormulaRow> = categories
        .iter()
        .map(|c_category| SpecFormulaRow {
            label: c_category.clone(),
            formula: format!(
                "=COUNTIF({c_column_ref}, \"{}\")",
                escape_formula_text(c_category)
            ),
        })
        .collect();

    // One-based rows: header at row_header + 1, categories right below.
    let n_row_first = row_header + 2;
    let n_row_last = row_header + 1 + rows.len();
    SpecFormulaBlock {
        column: column.to_string(),
        row_header,
        rows,
        total: SpecFormulaRow {
            label: C_LABEL_FORMULA_TOTAL.to_string(),
            formula: format!("=SUM(B{n_row_first}:B{n_row_last})"),
        },
    }
}

/// Plan the blocks for `columns` in order, skipping absent columns.
pub fn plan_formula_summary(
    table: &SpecRecordTable,
    data_sheet: &str,
    columns: &[&str],
    row_anchor: usize,
) -> Vec<SpecFormulaBlock> {
    let mut n_row_header = row_anchor;
    let mut l_blocks = Vec::with_capacity(columns.len());
    for c_column in columns {
        let Some(n_col_idx) = table.column_index(c_column) else {
            continue;
        };
        let l_categories = collect_distinct_categories(table, c_column);
        let block = build_formula_block(c_column, data_sheet, n_col_idx, &l_categories, n_row_header);
        n_row_header = block.row_total() + N_ROWS_FORMULA_STEP;
        l_blocks.push(block);
    }
    l_blocks
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::spec::Record;

    fn table(value: Value) -> SpecRecordTable {
        let l_records: Vec<Record> = serde_json::from_value(value).expect("records");
        SpecRecordTable::from_records(l_records)
    }

    #[test]
    fn test_collect_distinct_categories_first_seen_without_nulls() {
        let table = table(json!([
            { "Tipo": "Reemplazo" },
            { "Tipo": null },
            { "Tipo": "Nuevo" },
            { "Otro": 1 },
            { "Tipo": "Reemplazo" }
        ]));
        assert_eq!(
            collect_distinct_categories(&table, "Tipo"),
            vec!["Reemplazo", "Nuevo"]
        );
    }

    #[test]
    fn test_plan_formula_summary_rows_and_formulas() {
        let table = table(json!([
            { "Folio": 1, "Psicologo": "Ana", "Tipo": "Nuevo", "Estado": "Abierto" },
            { "Folio": 2, "Psicologo": "Ana", "Tipo": "Reemplazo", "Estado": "Abierto" },
            { "Folio": 3, "Psicologo": "Luis", "Tipo": "Nuevo", "Estado": "Cerrado" }
        ]));
        let l_blocks = plan_formula_summary(&table, "Requisiciones", &["Tipo", "Estado"], 1);
        assert_eq!(l_blocks.len(), 2);

        let block_tipo = &l_blocks[0];
        assert_eq!(block_tipo.row_header, 1);
        assert_eq!(derive_block_header(block_tipo), ["Tipo", "Suma de Solicitados"]);
        assert_eq!(block_tipo.rows[0].label, "Nuevo");
        assert_eq!(
            block_tipo.rows[0].formula,
            r#"=COUNTIF(Requisiciones!C:C, "Nuevo")"#
        );
        assert_eq!(block_tipo.row_total(), 4);
        assert_eq!(block_tipo.total.label, "Suma total");
        assert_eq!(block_tipo.total.formula, "=SUM(B3:B4)");

        let block_estado = &l_blocks[1];
        assert_eq!(block_estado.row_header, 7);
        assert_eq!(block_estado.rows.len(), 2);
        assert_eq!(
            block_estado.rows[1].formula,
            r#"=COUNTIF(Requisiciones!D:D, "Cerrado")"#
        );
        assert_eq!(block_estado.total.formula, "=SUM(B9:B10)");
    }

    #[test]
    fn test_plan_formula_summary_skips_absent_column() {
        let table = table(json!([{ "Estado": "Abierto" }]));
        let l_blocks = plan_formula_summary(&table, "Requisiciones", &["Tipo", "Estado"], 1);
        assert_eq!(l_blocks.len(), 1);
        assert_eq!(l_blocks[0].column, "Estado");
        assert_eq!(l_blocks[0].row_header, 1);
        assert_eq!(
            l_blocks[0].rows[0].formula,
            r#"=COUNTIF(Requisiciones!A:A, "Abierto")"#
        );
    }

    #[test]
    fn test_build_formula_block_escapes_quotes_and_handles_empty() {
        let block = build_formula_block(
            "Tipo",
            "Requisiciones",
            0,
            &[r#"Tipo "B""#.to_string()],
            1,
        );
        assert_eq!(
            block.rows[0].formula,
            r#"=COUNTIF(Requisiciones!A:A, "Tipo ""B""")"#
        );

        let block_empty = build_formula_block("Tipo", "Requisiciones", 0, &[], 1);
        assert_eq!(block_empty.row_total(), 2);
        assert_eq!(block_empty.total.formula, "=SUM(B3:B2)");
    }
}
