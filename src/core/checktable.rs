//! Column checks run against a raw table.
//!
//! Size checks measure the longest UTF-8 byte length of text columns and
//! the largest absolute value of integer columns. NULL checks only look at
//! columns declared NOT NULL, and the superkey check projects every row on
//! the pk columns.

use crate::domain::model::{ColumnSpec, ColumnType, Findings, MaxSize, Value, ValueKey};
use crate::domain::schema::Schema;
use crate::core::table::Table;
use std::collections::HashSet;

pub struct CheckTable {
    table_name: String,
    schema: Schema,
    table: Table,
}

impl CheckTable {
    pub fn new(table_name: impl Into<String>, schema: Schema, table: Table) -> Self {
        Self {
            table_name: table_name.into(),
            schema,
            table,
        }
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    fn values(&self, column_name: &str) -> Option<(&ColumnSpec, &[Value])> {
        let position = self.schema.position(column_name)?;
        Some((&self.schema.columns()[position], self.table.column(position)))
    }

    /// `None` when the table has no such column.
    pub fn max_size_of(&self, column_name: &str) -> Option<MaxSize> {
        let (spec, values) = self.values(column_name)?;
        Some(measure(&spec.column_type, values))
    }

    pub fn max_sizes(&self) -> Vec<(String, MaxSize)> {
        self.schema
            .columns()
            .iter()
            .zip(self.table.columns())
            .map(|(spec, values)| (spec.name.clone(), measure(&spec.column_type, values)))
            .collect()
    }

    pub fn size_error(&self) -> Vec<String> {
        self.schema
            .columns()
            .iter()
            .zip(self.table.columns())
            .filter(|(spec, values)| {
                let Some(size) = measure(&spec.column_type, values).measured() else {
                    return false;
                };
                match spec.column_type {
                    ColumnType::Text { bytes } => size > bytes,
                    // The absolute value is compared with max, so a type's
                    // minimum such as -32768 is reported as oversized.
                    ColumnType::Integer { max, .. } => size > max.unsigned_abs(),
                    ColumnType::Float => false,
                }
            })
            .map(|(spec, _)| spec.name.clone())
            .collect()
    }

    pub fn count_nan_of(&self, column_name: &str) -> Option<usize> {
        let (_, values) = self.values(column_name)?;
        Some(values.iter().filter(|value| value.is_null()).count())
    }

    /// NULL counts of the NOT NULL columns.
    pub fn count_nan(&self) -> Vec<(String, usize)> {
        self.schema
            .columns()
            .iter()
            .zip(self.table.columns())
            .filter(|(spec, _)| spec.not_null)
            .map(|(spec, values)| {
                (spec.name.clone(), values.iter().filter(|value| value.is_null()).count())
            })
            .collect()
    }

    pub fn not_null_constraint_error(&self) -> Vec<String> {
        self.count_nan()
            .into_iter()
            .filter(|(_, nulls)| *nulls > 0)
            .map(|(name, _)| name)
            .collect()
    }

    /// True when the pk columns do not identify every row.
    pub fn superkey_error(&self) -> bool {
        let key_positions: Vec<usize> = self
            .schema
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.pk)
            .map(|(position, _)| position)
            .collect();

        if key_positions.is_empty() {
            return false;
        }

        let mut seen = HashSet::with_capacity(self.table.row_count());
        (0..self.table.row_count()).any(|row| {
            let key: Vec<ValueKey> = key_positions
                .iter()
                .map(|&position| ValueKey::from(&self.table.column(position)[row]))
                .collect();
            !seen.insert(key)
        })
    }

    /// Columns holding values that do not parse as the column's type.
    pub fn type_error(&self) -> Vec<(String, usize)> {
        self.schema
            .columns()
            .iter()
            .zip(self.table.columns())
            .map(|(spec, values)| {
                let invalid = values
                    .iter()
                    .filter(|value| matches!(value, Value::Invalid(_)))
                    .count();
                (spec.name.clone(), invalid)
            })
            .filter(|(_, invalid)| *invalid > 0)
            .collect()
    }

    pub fn findings(&self) -> Findings {
        let findings = Findings {
            table_name: self.table_name.clone(),
            row_count: self.table.row_count(),
            max_sizes: self.max_sizes(),
            size_errors: self.size_error(),
            null_counts: self.count_nan(),
            not_null_errors: self.not_null_constraint_error(),
            superkey_error: self.superkey_error(),
            type_errors: self.type_error(),
        };

        tracing::debug!(
            "{}: {} size errors, {} not-null errors, superkey error: {}, {} type errors",
            findings.table_name,
            findings.size_errors.len(),
            findings.not_null_errors.len(),
            findings.superkey_error,
            findings.type_errors.len()
        );
        findings
    }
}

fn measure(column_type: &ColumnType, values: &[Value]) -> MaxSize {
    let sizes = values.iter().filter_map(|value| match (column_type, value) {
        (ColumnType::Text { .. }, Value::Text(text)) => Some(text.len() as u64),
        (ColumnType::Integer { .. }, Value::Int(number)) => Some(number.unsigned_abs()),
        _ => None,
    });

    match column_type {
        ColumnType::Float => MaxSize::NotMeasured,
        _ => sizes.max().map_or(MaxSize::AllNull, MaxSize::Measured),
    }
}
