//! Conversion of Redshift column data types into the types the checks use.
//!
//! A data type such as `VARCHAR(64)` or `NUMERIC(11, 4)` goes through four
//! steps:
//!
//! 1. split into a lowercase type name and at most two arguments,
//! 2. resolve aliases to one representative name (`int4` -> `integer`),
//! 3. map the representative to a storage class (`integer` -> [`StorageClass::Int32`]),
//! 4. widen the class to a [`ColumnType`]. Every integer class becomes
//!    [`ColumnType::Integer`] keeping its own range, every float class becomes
//!    [`ColumnType::Float`] and text classes keep their byte length.
//!
//! Widening means raw data always loads, whatever its size, so that
//! oversized values can be reported instead of rejected.

use crate::domain::model::ColumnType;
use crate::utils::error::{CheckError, Result};

/// Byte length assumed for text types declared without a length.
pub const DEFAULT_TEXT_BYTES: u64 = 64;

/// Byte length of `VARCHAR(MAX)`.
pub const MAX_VARCHAR_BYTES: u64 = 65_535;

/// Representative type name and the aliases Redshift accepts for it.
pub const REDSHIFT_TYPES: &[(&str, &[&str])] = &[
    ("smallint", &["smallint", "int2"]),
    ("integer", &["integer", "int", "int4"]),
    ("bigint", &["bigint", "int8"]),
    ("decimal", &["decimal", "numeric"]),
    ("real", &["real", "float4"]),
    ("double precision", &["double precision", "float8", "float"]),
    ("boolean", &["boolean", "bool"]),
    ("char", &["char", "character", "nchar", "bpchar"]),
    ("varchar", &["varchar", "character varying", "nvarchar", "text"]),
    ("date", &["date"]),
    ("timestamp", &["timestamp", "timestamp without time zone"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Text,
}

impl StorageClass {
    pub fn int_range(&self) -> Option<(i64, i64)> {
        match self {
            StorageClass::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            StorageClass::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            StorageClass::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

/// A data type split into its name and up to two arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgs {
    pub name: String,
    pub args: [Option<u64>; 2],
}

pub fn split_type_and_args(data_type: &str) -> Result<TypeArgs> {
    let lowered = data_type.trim().to_lowercase();
    let unsupported = |reason: &str| CheckError::UnsupportedDataType {
        data_type: data_type.to_string(),
        reason: reason.to_string(),
    };

    let (name_part, arg_part) = match lowered.find('(') {
        Some(open) => {
            let rest = &lowered[open + 1..];
            let close = rest
                .find(')')
                .ok_or_else(|| unsupported("missing closing parenthesis"))?;
            if !rest[close + 1..].trim().is_empty() {
                return Err(unsupported("unexpected text after the arguments"));
            }
            (&lowered[..open], Some(&rest[..close]))
        }
        None => (lowered.as_str(), None),
    };

    let name = name_part.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(unsupported("missing type name"));
    }

    let mut args = [None, None];
    if let Some(arg_part) = arg_part {
        let parts: Vec<&str> = arg_part
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() > 2 {
            return Err(unsupported("more than two arguments are not supported"));
        }
        for (slot, part) in args.iter_mut().zip(&parts) {
            *slot = Some(parse_arg(part).ok_or_else(|| unsupported("arguments must be integers"))?);
        }
    }

    Ok(TypeArgs { name, args })
}

fn parse_arg(arg: &str) -> Option<u64> {
    if arg == "max" {
        return Some(MAX_VARCHAR_BYTES);
    }
    arg.parse().ok()
}

pub fn representative_of(name: &str) -> Result<&'static str> {
    REDSHIFT_TYPES
        .iter()
        .find(|(_, aliases)| aliases.contains(&name))
        .map(|(representative, _)| *representative)
        .ok_or_else(|| CheckError::UnsupportedDataType {
            data_type: name.to_string(),
            reason: "misspelled or not a supported Redshift type".to_string(),
        })
}

pub fn storage_class_of(representative: &str) -> Result<StorageClass> {
    match representative {
        "smallint" => Ok(StorageClass::Int16),
        "integer" => Ok(StorageClass::Int32),
        "bigint" => Ok(StorageClass::Int64),
        "real" => Ok(StorageClass::Float32),
        "decimal" | "double precision" => Ok(StorageClass::Float64),
        "boolean" | "char" | "varchar" | "date" | "timestamp" => Ok(StorageClass::Text),
        other => Err(CheckError::UnsupportedDataType {
            data_type: other.to_string(),
            reason: "no storage class for this type".to_string(),
        }),
    }
}

/// Converts a Redshift data type such as `VARCHAR(64)` into a [`ColumnType`].
///
/// `DECIMAL(p, s)` becomes [`ColumnType::Float`]; precision and scale are
/// not checked.
pub fn parse_data_type(data_type: &str) -> Result<ColumnType> {
    let split = split_type_and_args(data_type)?;
    let class = storage_class_of(representative_of(&split.name)?)?;

    let column_type = match class {
        StorageClass::Int16 | StorageClass::Int32 | StorageClass::Int64 => {
            let (min, max) = class.int_range().unwrap_or((i64::MIN, i64::MAX));
            ColumnType::Integer { min, max }
        }
        StorageClass::Float32 | StorageClass::Float64 => ColumnType::Float,
        StorageClass::Text => ColumnType::Text {
            bytes: split.args[0].unwrap_or(DEFAULT_TEXT_BYTES),
        },
    };
    Ok(column_type)
}
