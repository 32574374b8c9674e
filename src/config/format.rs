use crate::utils::error::{CheckError, Result};
use serde::Deserialize;
use std::path::Path;

/// Spellings treated as NULL in addition to `na_value` unless
/// `keep_default_na` is false.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NaValues {
    One(String),
    Many(Vec<String>),
}

impl NaValues {
    fn contains(&self, text: &str) -> bool {
        match self {
            NaValues::One(value) => value == text,
            NaValues::Many(values) => values.iter().any(|value| value == text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Sig,
    Latin1,
}

impl Encoding {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "utf_8" | "utf8" | "u8" => Some(Encoding::Utf8),
            "utf_8_sig" | "utf8_sig" => Some(Encoding::Utf8Sig),
            "latin_1" | "latin1" | "iso_8859_1" | "iso8859_1" => Some(Encoding::Latin1),
            _ => None,
        }
    }
}

/// Layout of a raw data file, read from `dataconf/<table>.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileFormat {
    pub delimiter: String,
    pub encoding: String,
    pub na_value: NaValues,
    #[serde(default = "default_keep_default_na")]
    pub keep_default_na: bool,
}

fn default_keep_default_na() -> bool {
    true
}

impl FileFormat {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let format: FileFormat = serde_yaml::from_str(content)?;
        format.delimiter_byte()?;
        format.encoding()?;
        Ok(format)
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_str() {
            "\\t" | "tab" | "TAB" => return Ok(b'\t'),
            _ => {}
        }
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' && *byte != b'\r' => Ok(*byte),
            _ => Err(CheckError::InvalidConfigValueError {
                field: "delimiter".to_string(),
                value: self.delimiter.clone(),
                reason: "Delimiter must be a single ASCII character other than a quote or newline"
                    .to_string(),
            }),
        }
    }

    pub fn encoding(&self) -> Result<Encoding> {
        Encoding::from_label(&self.encoding).ok_or_else(|| CheckError::InvalidConfigValueError {
            field: "encoding".to_string(),
            value: self.encoding.clone(),
            reason: "Supported encodings: utf_8, utf_8_sig, latin_1".to_string(),
        })
    }

    /// Decodes raw file bytes into text.
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self.encoding()? {
            Encoding::Utf8 | Encoding::Utf8Sig => {
                let bytes = match bytes.strip_prefix(b"\xEF\xBB\xBF") {
                    Some(rest) => rest.to_vec(),
                    None => bytes,
                };
                String::from_utf8(bytes).map_err(|e| CheckError::EncodingError {
                    encoding: self.encoding.clone(),
                    message: format!(
                        "invalid byte sequence at offset {}",
                        e.utf8_error().valid_up_to()
                    ),
                })
            }
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }

    pub fn is_null(&self, text: &str) -> bool {
        self.na_value.contains(text) || (self.keep_default_na && DEFAULT_NA_VALUES.contains(&text))
    }
}
