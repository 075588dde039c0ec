//! Pivot layout planner for stacked category/total tables.

use crate::aggregate::aggregate_sum;
use crate::conf::{C_LABEL_PLACEHOLDER, N_ROWS_PIVOT_STEP_EXTRA};
use crate::spec::{
    ReportError, SpecPivotPlacement, SpecRecordTable, SpecSummaryRow, SpecSummaryTable,
};

/// Sum `value_col` per `category_col`, ascending by category.
pub fn derive_summary_table(
    table: &SpecRecordTable,
    category_col: &str,
    value_col: &str,
    header_value: &str,
) -> Result<SpecSummaryTable, ReportError> {
    let l_rows = aggregate_sum(table, &[category_col], value_col)?
        .into_iter()
        .map(|row| SpecSummaryRow {
            category: row.key(0).to_string(),
            total: row.total,
        })
        .collect();
    Ok(SpecSummaryTable {
        header_category: category_col.to_string(),
        header_value: header_value.to_string(),
        rows: l_rows,
    })
}

/// Stack summary tables vertically from `(row_anchor, col_anchor)`.
///
/// A table with exactly one category gets a zero-valued placeholder row so
/// its doughnut chart renders. Each table is followed by its total row; the
/// next table starts `categories + N_ROWS_PIVOT_STEP_EXTRA` rows below.
pub fn plan_pivot_layout(
    tables: Vec<SpecSummaryTable>,
    row_anchor: usize,
    col_anchor: usize,
) -> Vec<SpecPivotPlacement> {
    let mut n_row_start = row_anchor;
    let mut l_placements = Vec::with_capacity(tables.len());
    for table in tables {
        let SpecSummaryTable {
            header_category,
            header_value,
            mut rows,
        } = table;

        let n_total: i64 = rows.iter().map(|row| row.total).sum();
        let if_placeholder_added = rows.len() == 1;
        if if_placeholder_added {
            rows.push(SpecSummaryRow {
                category: C_LABEL_PLACEHOLDER.to_string(),
                total: 0,
            });
        }

        let placement = SpecPivotPlacement {
            header_category,
            header_value,
            rows,
            total: n_total,
            row_start: n_row_start,
            col_start: col_anchor,
            if_placeholder_added,
        };
        n_row_start += placement.n_categories() + N_ROWS_PIVOT_STEP_EXTRA;
        l_placements.push(placement);
    }
    l_placements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(header: &str, l_rows: &[(&str, i64)]) -> SpecSummaryTable {
        SpecSummaryTable {
            header_category: header.to_string(),
            header_value: "Total".to_string(),
            rows: l_rows
                .iter()
                .map(|(category, total)| SpecSummaryRow {
                    category: category.to_string(),
                    total: *total,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_category_gets_placeholder() {
        let l_placements = plan_pivot_layout(vec![summary("Tiempo", &[("Entre 0 y 20", 7)])], 1, 4);
        let placement = &l_placements[0];
        assert!(placement.if_placeholder_added);
        assert_eq!(placement.n_categories(), 2);
        assert_eq!(placement.rows[1].category, "(Otra categoría sin datos)");
        assert_eq!(placement.rows[1].total, 0);
        assert_eq!(placement.total, 7);
        assert_eq!(placement.n_rows(), 4);
    }

    #[test]
    fn test_chart_ranges_cover_data_rows_only() {
        // Header at Excel row 5 (index 4), four categories -> Excel rows 6..=9.
        let l_placements = plan_pivot_layout(
            vec![summary("Tipo", &[("A", 1), ("B", 2), ("C", 3), ("D", 4)])],
            4,
            4,
        );
        let placement = &l_placements[0];
        let range_categories = placement.range_categories("Empresas").expect("categories");
        let range_values = placement.range_values("Empresas").expect("values");
        assert_eq!(range_categories.to_formula_ref(), "'Empresas'!$E$6:$E$9");
        assert_eq!(range_values.to_formula_ref(), "'Empresas'!$F$6:$F$9");
        assert_eq!(placement.row_total(), 9);
        assert_eq!(placement.total, 10);
    }

    #[test]
    fn test_tables_stack_with_fixed_gap() {
        let l_placements = plan_pivot_layout(
            vec![
                summary("Tipo", &[("Nuevo", 3), ("Reemplazo", 2)]),
                summary("Tiempo", &[("Entre 0 y 20", 5)]),
            ],
            1,
            4,
        );
        assert_eq!(l_placements[0].row_start, 1);
        assert_eq!(l_placements[1].row_start, 1 + 2 + 4);
        assert!(!l_placements[0].if_placeholder_added);
        assert_eq!(
            l_placements[1].range_values("Empresas").expect("values").to_local_ref(),
            "F9:F10"
        );

        let region_first = l_placements[0].region("Empresas");
        let region_second = l_placements[1].region("Empresas");
        assert!(!reqkit_io_xlsx::is_region_overlap(&region_first, &region_second));
    }

    #[test]
    fn test_zero_categories_has_no_chart_range() {
        let l_placements = plan_pivot_layout(vec![summary("Tipo", &[])], 1, 4);
        let placement = &l_placements[0];
        assert_eq!(placement.n_rows(), 2);
        assert_eq!(placement.total, 0);
        assert!(placement.range_categories("Empresas").is_none());
    }
}
