//! Row filter and normalizer for raw requisition records.

use serde_json::Value;

use crate::conf::{
    C_COL_ANALYST, C_COL_ANALYST_NORM, C_COL_COMPANY, C_COL_COMPANY_NORM, C_COL_DAYS,
    C_COL_ELAPSED, C_COL_PENDING, C_COL_STATUS, C_STATUS_EXCLUDED, TUP_COL_DAYS_ALIASES,
    TUP_COLS_DROPPED,
};
use crate::spec::{EnumCategoryBucket, Record, ReportError, SpecRecordTable};

////////////////////////////////////////////////////////////////////////////////
// #region LenientParse

/// Coerce a JSON value to an integer, tolerating dirty input.
///
/// Integers pass through, finite floats truncate toward zero, numeric text
/// (surrounding whitespace ignored) parses the same way. Anything else
/// (missing, null, bool, non-numeric text, arrays, objects) becomes `0`.
pub fn parse_int_lenient(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(num)) => match num.as_i64() {
            Some(n) => n,
            None => num.as_f64().map_or(0, truncate_finite),
        },
        Some(Value::String(text)) => {
            let c_text = text.trim();
            match c_text.parse::<i64>() {
                Ok(n) => n,
                Err(_) => c_text.parse::<f64>().map_or(0, truncate_finite),
            }
        }
        _ => 0,
    }
}

fn truncate_finite(x: f64) -> i64 {
    if x.is_finite() { x.trunc() as i64 } else { 0 }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Buckets

/// Map a day count to its elapsed-time bucket.
///
/// Negative counts fall through to [`EnumCategoryBucket::High`].
pub fn categorize_days(n_days: i64) -> EnumCategoryBucket {
    match n_days {
        0..=20 => EnumCategoryBucket::Low,
        21..=50 => EnumCategoryBucket::Mid,
        _ => EnumCategoryBucket::High,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Columns

/// Return the first alias present in the table's column set.
pub fn resolve_column_alias<'a>(
    table: &SpecRecordTable,
    column: &str,
    aliases: &[&'a str],
) -> Result<&'a str, ReportError> {
    aliases
        .iter()
        .copied()
        .find(|c_alias| table.has_column(c_alias))
        .ok_or_else(|| ReportError::Schema {
            column: column.to_string(),
            candidates: aliases.iter().map(ToString::to_string).collect(),
            columns_found: table.columns.clone(),
        })
}

/// Fail with a schema error unless `column` is in the column set.
pub fn require_column(table: &SpecRecordTable, column: &str) -> Result<(), ReportError> {
    resolve_column_alias(table, column, &[column]).map(|_| ())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Normalize

fn is_excluded_status(record: &Record) -> bool {
    matches!(record.get(C_COL_STATUS), Some(Value::String(c_status)) if c_status == C_STATUS_EXCLUDED)
}

/// Filter, rename and coerce raw requisitions for the analytic report.
///
/// Steps:
/// - drop rows whose status is closed (rows without status stay)
/// - drop unused fields
/// - resolve the day-count alias and rename it, rename analyst/company
/// - coerce day and pending counts with [`parse_int_lenient`]
/// - append the elapsed-time bucket column
pub fn normalize_requisitions(records: Vec<Record>) -> Result<SpecRecordTable, ReportError> {
    let mut table = SpecRecordTable::from_records(records);
    table.records.retain(|record| !is_excluded_status(record));
    table.drop_columns(&TUP_COLS_DROPPED);

    let c_col_days = resolve_column_alias(&table, C_COL_DAYS, &TUP_COL_DAYS_ALIASES)?;
    require_column(&table, C_COL_PENDING)?;

    table.rename_column(c_col_days, C_COL_DAYS);
    table.rename_column(C_COL_ANALYST, C_COL_ANALYST_NORM);
    table.rename_column(C_COL_COMPANY, C_COL_COMPANY_NORM);

    for record in &mut table.records {
        let n_days = parse_int_lenient(record.get(C_COL_DAYS));
        let n_pending = parse_int_lenient(record.get(C_COL_PENDING));
        record.insert(C_COL_DAYS.to_string(), Value::from(n_days));
        record.insert(C_COL_PENDING.to_string(), Value::from(n_pending));
        record.insert(
            C_COL_ELAPSED.to_string(),
            Value::from(categorize_days(n_days).label()),
        );
    }
    table.push_column(C_COL_ELAPSED);

    Ok(table)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
