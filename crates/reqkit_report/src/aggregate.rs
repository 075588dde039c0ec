//! Grouped sums over one or two key columns.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::normalize::{parse_int_lenient, require_column};
use crate::spec::{ReportError, SpecAggregateRow, SpecRecordTable};

/// Text form of a grouping value; `None` for missing or null.
pub fn derive_key_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(if *flag { "True" } else { "False" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Sum `value_col` per distinct combination of `key_cols`.
///
/// Rows with a missing/null key are skipped. Output is ordered by ascending
/// key so downstream stable sorts break ties deterministically. Only
/// combinations present in the data are returned.
pub fn aggregate_sum(
    table: &SpecRecordTable,
    key_cols: &[&str],
    value_col: &str,
) -> Result<Vec<SpecAggregateRow>, ReportError> {
    for c_col in key_cols {
        require_column(table, c_col)?;
    }

    let mut dict_totals: BTreeMap<Vec<String>, i64> = BTreeMap::new();
    'records: for record in &table.records {
        let mut l_keys = Vec::with_capacity(key_cols.len());
        for c_col in key_cols {
            let Some(c_key) = derive_key_text(record.get(*c_col)) else {
                continue 'records;
            };
            l_keys.push(c_key);
        }
        *dict_totals.entry(l_keys).or_insert(0) += parse_int_lenient(record.get(value_col));
    }

    Ok(dict_totals
        .into_iter()
        .map(|(keys, total)| SpecAggregateRow { keys, total })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::spec::Record;

    fn table(value: Value) -> SpecRecordTable {
        let l_records: Vec<Record> = serde_json::from_value(value).expect("records");
        SpecRecordTable::from_records(l_records)
    }

    #[test]
    fn test_aggregate_sum_two_keys() {
        let table = table(json!([
            { "Psicologo": "Ana", "Compania": "X", "Pendientes": 2 },
            { "Psicologo": "Ana", "Compania": "X", "Pendientes": 3 },
            { "Psicologo": "Ana", "Compania": "Y", "Pendientes": 1 },
            { "Psicologo": "Luis", "Compania": "X", "Pendientes": 4 },
            { "Psicologo": null, "Compania": "X", "Pendientes": 9 },
            { "Compania": "X", "Pendientes": 9 }
        ]));
        let l_rows = aggregate_sum(&table, &["Psicologo", "Compania"], "Pendientes").expect("sum");
        let l_flat: Vec<(&str, &str, i64)> = l_rows
            .iter()
            .map(|row| (row.key(0), row.key(1), row.total))
            .collect();
        assert_eq!(
            l_flat,
            vec![("Ana", "X", 5), ("Ana", "Y", 1), ("Luis", "X", 4)]
        );
    }

    #[test]
    fn test_aggregate_sum_single_key_stringifies_numbers() {
        let table = table(json!([
            { "Tipo": 1, "Pendientes": 2 },
            { "Tipo": "1", "Pendientes": 3 }
        ]));
        let l_rows = aggregate_sum(&table, &["Tipo"], "Pendientes").expect("sum");
        assert_eq!(l_rows.len(), 1);
        assert_eq!(l_rows[0].total, 5);
    }

    #[test]
    fn test_aggregate_sum_unknown_key_is_schema_error() {
        let table = table(json!([{ "Tipo": "Nuevo", "Pendientes": 1 }]));
        let err = aggregate_sum(&table, &["Compania"], "Pendientes").unwrap_err();
        assert!(matches!(err, ReportError::Schema { .. }));
    }

    #[test]
    fn test_aggregate_sum_empty_table() {
        let mut table = table(json!([{ "Tipo": "Nuevo", "Pendientes": 1 }]));
        table.records.clear();
        assert!(aggregate_sum(&table, &["Tipo"], "Pendientes").expect("sum").is_empty());
    }
}
