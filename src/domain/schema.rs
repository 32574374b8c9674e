use crate::core::redshift::parse_data_type;
use crate::domain::model::ColumnSpec;
use crate::utils::error::{CheckError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// One row of `dataconf/<table>.csv`.
#[derive(Debug, Deserialize)]
struct ColumnRow {
    physical_column_name: String,
    pk: String,
    not_null_constraint: String,
    data_type: String,
}

/// Column definitions of a table, in raw file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        if columns.is_empty() {
            return Err(CheckError::SchemaError {
                message: "the column file defines no columns".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CheckError::SchemaError {
                    message: format!("column '{}' is defined more than once", column.name),
                });
            }
        }

        Ok(Self { columns })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut columns = Vec::new();
        for row in reader.deserialize::<ColumnRow>() {
            let row = row?;
            let name = row.physical_column_name;
            if name.is_empty() {
                return Err(CheckError::SchemaError {
                    message: format!("column {} has an empty physical_column_name", columns.len() + 1),
                });
            }

            let column_type = parse_data_type(&row.data_type)?;
            columns.push(ColumnSpec {
                pk: parse_flag(&name, "pk", &row.pk)?,
                not_null: parse_flag(&name, "not_null_constraint", &row.not_null_constraint)?,
                data_type: row.data_type,
                column_type,
                name,
            });
        }

        tracing::debug!("Loaded {} column definitions", columns.len());
        Self::new(columns)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

fn parse_flag(column: &str, field: &str, value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(CheckError::SchemaError {
            message: format!("column '{}': {} must be 0 or 1, got '{}'", column, field, other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ColumnType;

    const COLUMNS: &str = "physical_column_name,pk,not_null_constraint,data_type\n\
id,1,1,INT\n\
name,0,1,VARCHAR(16)\n\
price,0,0,\"NUMERIC(11, 4)\"\n";

    #[test]
    fn test_from_csv_reader() {
        let schema = Schema::from_csv_reader(COLUMNS.as_bytes()).unwrap();

        assert_eq!(schema.len(), 3);
        let id = schema.column("id").unwrap();
        assert!(id.pk && id.not_null);
        assert_eq!(
            id.column_type,
            ColumnType::Integer { min: -2_147_483_648, max: 2_147_483_647 }
        );
        assert_eq!(schema.column("name").unwrap().column_type, ColumnType::Text { bytes: 16 });
        assert_eq!(schema.column("price").unwrap().column_type, ColumnType::Float);
        assert_eq!(schema.column("price").unwrap().data_type, "NUMERIC(11, 4)");
        assert_eq!(schema.position("price"), Some(2));
    }

    #[test]
    fn test_rejects_bad_flags() {
        let csv = "physical_column_name,pk,not_null_constraint,data_type\nid,yes,1,INT\n";
        assert!(matches!(
            Schema::from_csv_reader(csv.as_bytes()),
            Err(CheckError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_empty_schema() {
        let duplicate = "physical_column_name,pk,not_null_constraint,data_type\nid,1,1,INT\nid,0,0,INT\n";
        assert!(Schema::from_csv_reader(duplicate.as_bytes()).is_err());

        let empty = "physical_column_name,pk,not_null_constraint,data_type\n";
        assert!(Schema::from_csv_reader(empty.as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_missing_header_field() {
        let csv = "physical_column_name,pk,data_type\nid,1,INT\n";
        assert!(matches!(
            Schema::from_csv_reader(csv.as_bytes()),
            Err(CheckError::CsvError(_))
        ));
    }

    #[test]
    fn test_unsupported_data_type() {
        let csv = "physical_column_name,pk,not_null_constraint,data_type\nts,0,0,TIMESTAMPTZ\n";
        assert!(matches!(
            Schema::from_csv_reader(csv.as_bytes()),
            Err(CheckError::UnsupportedDataType { .. })
        ));
    }
}
