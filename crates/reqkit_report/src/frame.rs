//! Record table to `polars` DataFrame conversion for detail sheets.

use polars::prelude::{Column, DataFrame};
use serde_json::Value;

use crate::spec::{ReportError, SpecRecordTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnumColumnKind {
    Integer,
    Float,
    Text,
}

fn derive_column_kind(values: &[Option<&Value>]) -> EnumColumnKind {
    let mut l_present = values.iter().flatten().peekable();
    if l_present.peek().is_none() {
        return EnumColumnKind::Text;
    }
    let mut kind = EnumColumnKind::Integer;
    for value in l_present {
        match value {
            Value::Number(num) if num.as_i64().is_some() => {}
            Value::Number(_) => kind = EnumColumnKind::Float,
            _ => return EnumColumnKind::Text,
        }
    }
    kind
}

/// Display text of a non-numeric cell.
pub fn derive_cell_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Bool(flag) => if *flag { "True" } else { "False" }.to_string(),
        other => other.to_string(),
    }
}

/// Build a DataFrame with one column per table column, in table order.
///
/// Columns holding only integers become `Int64`, only numbers `Float64`,
/// anything else `String`. Missing and null cells become nulls.
pub fn derive_dataframe_from_table(table: &SpecRecordTable) -> Result<DataFrame, ReportError> {
    let mut l_columns = Vec::with_capacity(table.columns.len());
    for c_col in &table.columns {
        let l_values: Vec<Option<&Value>> = table
            .records
            .iter()
            .map(|record| record.get(c_col).filter(|value| !value.is_null()))
            .collect();

        let column = match derive_column_kind(&l_values) {
            EnumColumnKind::Integer => Column::new(
                c_col.as_str().into(),
                l_values
                    .iter()
                    .map(|value| value.and_then(Value::as_i64))
                    .collect::<Vec<Option<i64>>>(),
            ),
            EnumColumnKind::Float => Column::new(
                c_col.as_str().into(),
                l_values
                    .iter()
                    .map(|value| value.and_then(Value::as_f64))
                    .collect::<Vec<Option<f64>>>(),
            ),
            EnumColumnKind::Text => Column::new(
                c_col.as_str().into(),
                l_values
                    .iter()
                    .map(|value| value.map(derive_cell_text))
                    .collect::<Vec<Option<String>>>(),
            ),
        };
        l_columns.push(column);
    }

    DataFrame::new(l_columns)
        .map_err(|err| ReportError::internal(format!("Failed to build DataFrame: {err}")))
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, DataType};
    use serde_json::json;

    use super::*;
    use crate::spec::Record;

    #[test]
    fn test_derive_dataframe_infers_column_types() {
        let l_records: Vec<Record> = serde_json::from_value(json!([
            { "Folio": 1, "Monto": 1.5, "Tipo": "Nuevo", "Mixto": 1, "Activo": true },
            { "Folio": null, "Monto": 2, "Tipo": null, "Mixto": "x" }
        ]))
        .expect("records");
        let table = SpecRecordTable::from_records(l_records);
        let df = derive_dataframe_from_table(&table).expect("dataframe");

        assert_eq!(
            df.get_column_names_str(),
            vec!["Folio", "Monto", "Tipo", "Mixto", "Activo"]
        );
        assert_eq!(df.height(), 2);

        let l_dtypes: Vec<DataType> = df.dtypes();
        assert_eq!(l_dtypes[0], DataType::Int64);
        assert_eq!(l_dtypes[1], DataType::Float64);
        assert_eq!(l_dtypes[2], DataType::String);
        assert_eq!(l_dtypes[3], DataType::String);
        assert_eq!(l_dtypes[4], DataType::String);

        let folio = df.column("Folio").expect("Folio");
        assert_eq!(folio.get(1).expect("cell"), AnyValue::Null);
        let activo = df.column("Activo").expect("Activo");
        assert_eq!(activo.get(0).expect("cell"), AnyValue::String("True"));
        assert_eq!(activo.get(1).expect("cell"), AnyValue::Null);
    }

    #[test]
    fn test_derive_dataframe_empty_table() {
        let df = derive_dataframe_from_table(&SpecRecordTable::default()).expect("dataframe");
        assert_eq!(df.width(), 0);
    }
}
