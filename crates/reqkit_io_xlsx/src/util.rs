//! Stateless helper utilities used by the XLSX writer kernel.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{EnumCellValue, SpecSheetRegion};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Normalize a cell value for its column kind.
///
/// Missing values stay blank. Numbers in text columns are written as text,
/// and integer columns keep fractional numbers as text instead of rounding.
pub fn convert_cell_value(
    value: &EnumCellValue,
    if_is_numeric_col: bool,
    if_is_integer_col: bool,
) -> EnumCellValue {
    match value {
        EnumCellValue::Number(n) if !if_is_numeric_col => EnumCellValue::String(n.to_string()),
        EnumCellValue::Number(n) if if_is_integer_col && n.fract() != 0.0 => {
            EnumCellValue::String(n.to_string())
        }
        other => other.clone(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DataFrameLikeUtils

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), String> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter_map(|(c_name, l_pos)| {
            if l_pos.len() > 1 {
                Some(format!(
                    "{c_name:?} x{} at indices {:?}",
                    l_pos.len(),
                    l_pos
                ))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(format!("Duplicate column names detected: {c_msg}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region A1References

/// Convert zero-based column index to Excel letters (`0 -> A`, `27 -> AB`).
pub fn derive_column_letter(col_idx: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_rest = col_idx + 1;
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push((b'A' + n_rem as u8) as char);
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

/// Sheet prefix usable inside a formula; quoted only when required.
pub fn derive_sheet_ref(sheet_name: &str) -> String {
    let if_plain = !sheet_name.is_empty()
        && sheet_name
            .chars()
            .all(|chr| chr.is_ascii_alphanumeric() || chr == '_')
        && !sheet_name.starts_with(|chr: char| chr.is_ascii_digit());
    if if_plain {
        sheet_name.to_string()
    } else {
        format!("'{}'", sheet_name.replace('\'', "''"))
    }
}

/// Escape text for embedding in a double-quoted formula string literal.
pub fn escape_formula_text(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Whether two regions share at least one cell (same sheet only).
pub fn is_region_overlap(lhs: &SpecSheetRegion, rhs: &SpecSheetRegion) -> bool {
    if lhs.sheet_name != rhs.sheet_name || lhs.is_empty() || rhs.is_empty() {
        return false;
    }
    lhs.row_start <= rhs.row_end()
        && rhs.row_start <= lhs.row_end()
        && lhs.col_start <= rhs.col_end()
        && rhs.col_start <= lhs.col_end()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecCellRange;

    fn region(sheet: &str, row: usize, col: usize, n_rows: usize, n_cols: usize) -> SpecSheetRegion {
        SpecSheetRegion {
            sheet_name: sheet.to_string(),
            row_start: row,
            col_start: col,
            n_rows,
            n_cols,
        }
    }

    #[test]
    fn test_derive_column_letter_crosses_alphabet_boundaries() {
        assert_eq!(derive_column_letter(0), "A");
        assert_eq!(derive_column_letter(4), "E");
        assert_eq!(derive_column_letter(25), "Z");
        assert_eq!(derive_column_letter(26), "AA");
        assert_eq!(derive_column_letter(27), "AB");
        assert_eq!(derive_column_letter(701), "ZZ");
        assert_eq!(derive_column_letter(702), "AAA");
        assert_eq!(derive_column_letter(16_383), "XFD");
    }

    #[test]
    fn test_cell_range_renders_one_based_absolute_refs() {
        let range = SpecCellRange {
            sheet_name: "Empresas".to_string(),
            row_start: 2,
            col_start: 4,
            row_end: 4,
            col_end: 4,
        };
        assert_eq!(range.to_formula_ref(), "'Empresas'!$E$3:$E$5");
        assert_eq!(range.to_local_ref(), "E3:E5");
        assert_eq!(range.to_column_ref(), "Empresas!E:E");
    }

    #[test]
    fn test_derive_sheet_ref_quotes_only_when_needed() {
        assert_eq!(derive_sheet_ref("Requisiciones"), "Requisiciones");
        assert_eq!(derive_sheet_ref("Resumen psicólogo"), "'Resumen psicólogo'");
        assert_eq!(derive_sheet_ref("2024"), "'2024'");
        assert_eq!(derive_sheet_ref("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn test_escape_formula_text_doubles_quotes() {
        assert_eq!(escape_formula_text(r#"Tipo "A""#), r#"Tipo ""A"""#);
        assert_eq!(escape_formula_text("Nuevo"), "Nuevo");
    }

    #[test]
    fn test_is_region_overlap() {
        let grouped = region("Empresas", 0, 0, 10, 3);
        let pivot = region("Empresas", 1, 4, 5, 2);
        assert!(!is_region_overlap(&grouped, &pivot));

        let clash = region("Empresas", 9, 2, 1, 1);
        assert!(is_region_overlap(&grouped, &clash));

        let other_sheet = region("Analista", 0, 0, 10, 3);
        assert!(!is_region_overlap(&grouped, &other_sheet));

        let empty = region("Empresas", 0, 0, 0, 3);
        assert!(!is_region_overlap(&grouped, &empty));
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").chars().count(), 31);
    }

    #[test]
    fn test_convert_cell_value_by_column_kind() {
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(3.0), true, true),
            EnumCellValue::Number(3.0)
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(3.5), true, true),
            EnumCellValue::String("3.5".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(3.5), true, false),
            EnumCellValue::Number(3.5)
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::Number(7.0), false, false),
            EnumCellValue::String("7".to_string())
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::None, true, true),
            EnumCellValue::None
        );
        assert_eq!(
            convert_cell_value(&EnumCellValue::from("Nuevo"), false, false),
            EnumCellValue::from("Nuevo")
        );
    }

    #[test]
    fn test_validate_unique_columns_reports_duplicates() {
        let columns = vec!["Tipo".to_string(), "Estado".to_string(), "Tipo".to_string()];
        let err = validate_unique_columns(&columns).unwrap_err();
        assert!(err.contains("\"Tipo\" x2"));
    }
}
