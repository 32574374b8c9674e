/// Data type a column is checked against, widened from its Redshift type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnType {
    Integer { min: i64, max: i64 },
    Float,
    Text { bytes: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub pk: bool,
    pub not_null: bool,
    pub data_type: String,
    pub column_type: ColumnType,
}

/// A cell of the raw file after NULL detection and numeric parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    /// Text that does not parse as the column's numeric type.
    Invalid(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Hashable projection of a [`Value`] used for superkey checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Int(i64),
    Float(u64),
    Text(String),
}

impl From<&Value> for ValueKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            Value::Int(i) => ValueKey::Int(*i),
            // -0.0 and 0.0 are the same key
            Value::Float(f) => ValueKey::Float(if *f == 0.0 { 0 } else { f.to_bits() }),
            Value::Text(s) | Value::Invalid(s) => ValueKey::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxSize {
    Measured(u64),
    /// No value of the column could be measured.
    AllNull,
    /// Float columns have no size limit to test.
    NotMeasured,
}

impl MaxSize {
    pub fn measured(&self) -> Option<u64> {
        match self {
            MaxSize::Measured(size) => Some(*size),
            _ => None,
        }
    }
}

/// Everything the checks found for one table, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Findings {
    pub table_name: String,
    pub row_count: usize,
    pub max_sizes: Vec<(String, MaxSize)>,
    pub size_errors: Vec<String>,
    pub null_counts: Vec<(String, usize)>,
    pub not_null_errors: Vec<String>,
    pub superkey_error: bool,
    pub type_errors: Vec<(String, usize)>,
}

impl Findings {
    pub fn has_errors(&self) -> bool {
        !self.size_errors.is_empty()
            || !self.not_null_errors.is_empty()
            || self.superkey_error
            || !self.type_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_key_equality() {
        assert_eq!(ValueKey::from(&Value::Null), ValueKey::from(&Value::Null));
        assert_eq!(ValueKey::from(&Value::Float(0.0)), ValueKey::from(&Value::Float(-0.0)));
        assert_eq!(
            ValueKey::from(&Value::Invalid("x".to_string())),
            ValueKey::from(&Value::Text("x".to_string()))
        );
        assert_ne!(ValueKey::from(&Value::Int(1)), ValueKey::from(&Value::Null));
    }

    #[test]
    fn test_findings_has_errors() {
        let mut findings = Findings {
            table_name: "colors".to_string(),
            row_count: 0,
            max_sizes: vec![],
            size_errors: vec![],
            null_counts: vec![("hex".to_string(), 0)],
            not_null_errors: vec![],
            superkey_error: false,
            type_errors: vec![],
        };
        assert!(!findings.has_errors());

        findings.superkey_error = true;
        assert!(findings.has_errors());
    }
}
