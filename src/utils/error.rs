use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported Redshift data type '{data_type}': {reason}")]
    UnsupportedDataType { data_type: String, reason: String },

    #[error("Schema error: {message}")]
    SchemaError { message: String },

    #[error("Record {record} has {found} fields, expected at most {expected}")]
    MalformedRow {
        record: u64,
        found: usize,
        expected: usize,
    },

    #[error("Cannot decode raw data as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::ConfigValidationError { .. }
            | CheckError::MissingConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::YamlError(_) => ErrorCategory::Configuration,
            CheckError::IoError(_) => ErrorCategory::Io,
            CheckError::CsvError(_)
            | CheckError::UnsupportedDataType { .. }
            | CheckError::SchemaError { .. }
            | CheckError::MalformedRow { .. }
            | CheckError::EncodingError { .. } => ErrorCategory::Data,
            CheckError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Critical,
            ErrorCategory::Processing => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Io => 2,
            ErrorCategory::Data | ErrorCategory::Processing => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CheckError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Run from the project root, or pass --root; data/, dataconf/ and output/ are resolved from it".to_string()
            }
            CheckError::IoError(_) => "Check file permissions and free disk space".to_string(),
            CheckError::YamlError(_) => {
                "The format file needs 'delimiter', 'encoding' and 'na_value' keys".to_string()
            }
            CheckError::CsvError(_) | CheckError::SchemaError { .. } => {
                "The column file needs the header physical_column_name,pk,not_null_constraint,data_type".to_string()
            }
            CheckError::UnsupportedDataType { .. } => {
                "Fix the data_type spelling in the column file; quote types with commas such as \"NUMERIC(11, 4)\"".to_string()
            }
            CheckError::MalformedRow { .. } => {
                "Check the delimiter in the format file and the number of columns in the column file".to_string()
            }
            CheckError::EncodingError { .. } => {
                "Set 'encoding' in the format file to the encoding the raw file was written in".to_string()
            }
            CheckError::ConfigValidationError { .. }
            | CheckError::MissingConfigError { .. }
            | CheckError::InvalidConfigValueError { .. } => {
                "Review checktable.toml and the command line arguments".to_string()
            }
            CheckError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Data => format!("Input data could not be read: {}", self),
            ErrorCategory::Processing => format!("Check failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
