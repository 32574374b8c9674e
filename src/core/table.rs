use crate::config::format::FileFormat;
use crate::domain::model::{ColumnType, Value};
use crate::domain::schema::Schema;
use crate::utils::error::{CheckError, Result};

/// Raw data held column by column, one `Vec<Value>` per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Vec<Value>>,
    row_count: usize,
}

impl Table {
    /// Parses a headerless raw file. Short records are padded with NULL,
    /// long records are an error.
    pub fn read(bytes: Vec<u8>, format: &FileFormat, schema: &Schema) -> Result<Self> {
        let text = format.decode(bytes)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(format.delimiter_byte()?)
            .flexible(true)
            .from_reader(text.as_bytes());

        let width = schema.len();
        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); width];
        let mut row_count = 0;

        for (index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > width {
                return Err(CheckError::MalformedRow {
                    record: index as u64 + 1,
                    found: record.len(),
                    expected: width,
                });
            }

            for (position, spec) in schema.columns().iter().enumerate() {
                let value = match record.get(position) {
                    Some(cell) => parse_cell(cell, &spec.column_type, format),
                    None => Value::Null,
                };
                columns[position].push(value);
            }
            row_count += 1;
        }

        tracing::debug!("Read {} rows of {} columns", row_count, width);
        Ok(Self { columns, row_count })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, position: usize) -> &[Value] {
        &self.columns[position]
    }

    pub fn columns(&self) -> &[Vec<Value>] {
        &self.columns
    }
}

pub fn parse_cell(cell: &str, column_type: &ColumnType, format: &FileFormat) -> Value {
    if format.is_null(cell) {
        return Value::Null;
    }

    match column_type {
        ColumnType::Integer { .. } => parse_integer(cell.trim())
            .map(Value::Int)
            .unwrap_or_else(|| Value::Invalid(cell.to_string())),
        ColumnType::Float => match cell.trim().parse::<f64>() {
            Ok(number) if !number.is_nan() => Value::Float(number),
            _ => Value::Invalid(cell.to_string()),
        },
        ColumnType::Text { .. } => Value::Text(cell.to_string()),
    }
}

/// Accepts `42`, `+42`, `-42` and float literals without a fraction such as `42.0`.
fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(number) = text.parse::<i64>() {
        return Some(number);
    }

    let number = text.parse::<f64>().ok()?;
    if number.is_finite() && number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 {
        Some(number as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(delimiter: &str) -> FileFormat {
        FileFormat::from_yaml_str(&format!(
            "delimiter: '{}'\nencoding: utf_8\nna_value: ''\n",
            delimiter
        ))
        .unwrap()
    }

    fn schema() -> Schema {
        Schema::from_csv_reader(
            "physical_column_name,pk,not_null_constraint,data_type\n\
id,1,1,SMALLINT\n\
label,0,0,VARCHAR(8)\n\
score,0,0,FLOAT8\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_read_typed_columns() {
        let raw = "1,red,0.5\n-2,\"blue, dark\",\n3.0,,abc\n";
        let table = Table::read(raw.as_bytes().to_vec(), &format(","), &schema()).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column(0), &[Value::Int(1), Value::Int(-2), Value::Int(3)]);
        assert_eq!(
            table.column(1),
            &[
                Value::Text("red".to_string()),
                Value::Text("blue, dark".to_string()),
                Value::Null
            ]
        );
        assert_eq!(
            table.column(2),
            &[Value::Float(0.5), Value::Null, Value::Invalid("abc".to_string())]
        );
    }

    #[test]
    fn test_short_rows_are_padded_and_blank_lines_skipped() {
        let raw = "1\tred\n\n2\n";
        let table = Table::read(raw.as_bytes().to_vec(), &format("\\t"), &schema()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(1)[1], Value::Null);
        assert_eq!(table.column(2), &[Value::Null, Value::Null]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let raw = "1,red,0.5\n2,blue,0.1,extra\n";
        let err = Table::read(raw.as_bytes().to_vec(), &format(","), &schema()).unwrap_err();

        assert!(matches!(
            err,
            CheckError::MalformedRow { record: 2, found: 4, expected: 3 }
        ));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("+42"), Some(42));
        assert_eq!(parse_integer("8674000000"), Some(8_674_000_000));
        assert_eq!(parse_integer("-7.0"), Some(-7));
        assert_eq!(parse_integer("7.5"), None);
        assert_eq!(parse_integer("seven"), None);
        assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
    }
}
