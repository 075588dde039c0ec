//! Grouped-sorted-subtotal table builder.

use crate::spec::{EnumGroupedRowKind, SpecAggregateRow, SpecGroupedRow, SpecGroupedTable};

struct SpecGroupAccumulator<'a> {
    outer: &'a str,
    total: i64,
    rows: Vec<&'a SpecAggregateRow>,
}

/// Order two-key aggregate rows into subtotalled groups.
///
/// Groups (by first key) are sorted by descending group total, rows inside
/// a group by descending total; both sorts keep encounter order on ties.
/// Every group is closed by a subtotal row and the table by one grand-total
/// row summing the detail rows. Empty input yields only the grand total.
pub fn build_grouped_subtotal_table(rows: &[SpecAggregateRow]) -> SpecGroupedTable {
    let mut l_groups: Vec<SpecGroupAccumulator<'_>> = Vec::new();
    for row in rows {
        let c_outer = row.key(0);
        match l_groups.iter_mut().find(|group| group.outer == c_outer) {
            Some(group) => {
                group.total += row.total;
                group.rows.push(row);
            }
            None => l_groups.push(SpecGroupAccumulator {
                outer: c_outer,
                total: row.total,
                rows: vec![row],
            }),
        }
    }
    l_groups.sort_by(|lhs, rhs| rhs.total.cmp(&lhs.total));

    let mut l_rows_out = Vec::with_capacity(rows.len() + l_groups.len() + 1);
    let mut n_grand_total = 0i64;
    for mut group in l_groups {
        group.rows.sort_by(|lhs, rhs| rhs.total.cmp(&lhs.total));
        for row in &group.rows {
            n_grand_total += row.total;
            l_rows_out.push(SpecGroupedRow {
                kind: EnumGroupedRowKind::Detail,
                outer: group.outer.to_string(),
                inner: row.key(1).to_string(),
                total: row.total,
            });
        }
        l_rows_out.push(SpecGroupedRow {
            kind: EnumGroupedRowKind::Subtotal,
            outer: group.outer.to_string(),
            inner: String::new(),
            total: group.total,
        });
    }
    l_rows_out.push(SpecGroupedRow {
        kind: EnumGroupedRowKind::GrandTotal,
        outer: String::new(),
        inner: String::new(),
        total: n_grand_total,
    });

    SpecGroupedTable { rows: l_rows_out }
}
