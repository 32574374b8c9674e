use crate::utils::error::{CheckError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "checktable.toml";

/// Project settings read from `checktable.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: String,
    pub dataconf_dir: String,
    pub output_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            dataconf_dir: "dataconf".to_string(),
            output_dir: "output".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportConfig {
    pub strict: Option<bool>,
}

impl ProjectConfig {
    /// Loads the config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn from_optional_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            tracing::debug!("Loading project config from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CheckError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> Result<Option<LogFormat>> {
        self.logging
            .format
            .as_deref()
            .map(|format| {
                format
                    .parse::<LogFormat>()
                    .map_err(|reason| CheckError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.to_string(),
                        reason,
                    })
            })
            .transpose()
    }

    pub fn strict(&self) -> bool {
        self.report.strict.unwrap_or(false)
    }
}

impl Validate for ProjectConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::{validate_non_empty_string, validate_path};

        validate_path("paths.data_dir", &self.paths.data_dir)?;
        validate_path("paths.dataconf_dir", &self.paths.dataconf_dir)?;
        validate_path("paths.output_dir", &self.paths.output_dir)?;

        if let Some(level) = &self.logging.level {
            validate_non_empty_string("logging.level", level)?;
            let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(CheckError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        self.log_format()?;
        Ok(())
    }
}
