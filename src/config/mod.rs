pub mod format;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_file_name, validate_path, Validate};
use toml_config::PathsConfig;

pub const RAW_FILE_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

#[cfg(feature = "cli")]
use crate::core::report::AnalysisType;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "checktable")]
#[command(about = "Check a raw data file against its Redshift column definitions")]
#[command(group(
    clap::ArgGroup::new("analysis")
        .required(true)
        .multiple(true)
        .args(["summary", "detail"])
))]
pub struct CliConfig {
    /// Write output/<table>-summary.txt listing failing columns
    #[arg(short = 's', long)]
    pub summary: bool,

    /// Write output/<table>-detail.txt with max sizes and NULL counts
    #[arg(short = 'd', long)]
    pub detail: bool,

    /// Raw data file name inside the data directory, e.g. colors.tsv
    pub raw_file: String,

    /// Project root holding data/, dataconf/ and output/
    #[arg(long, default_value = ".")]
    pub root: std::path::PathBuf,

    /// Project config file (default: <root>/checktable.toml when present)
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Also print the reports to stdout
    #[arg(long)]
    pub print: bool,

    /// Exit with status 4 when any error is found
    #[arg(long)]
    pub strict: bool,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log output format: compact or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn analyses(&self) -> Vec<AnalysisType> {
        let mut analyses = Vec::new();
        if self.summary {
            analyses.push(AnalysisType::Summary);
        }
        if self.detail {
            analyses.push(AnalysisType::Detail);
        }
        analyses
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join(toml_config::DEFAULT_CONFIG_FILE))
    }

    /// An explicit `--config` must exist; the default file under the root is optional.
    pub fn project_config(&self) -> Result<toml_config::ProjectConfig> {
        match &self.config {
            Some(path) => toml_config::ProjectConfig::from_file(path),
            None => toml_config::ProjectConfig::from_optional_file(self.config_path()),
        }
    }
}

/// Paths of one table's files, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    table_name: String,
    format_file: String,
    schema_file: String,
    raw_file: String,
    output_dir: String,
}

impl ProjectLayout {
    /// The table name is the raw file name up to its first `.`, so
    /// `colors.tsv` reads `dataconf/colors.yml` and `dataconf/colors.csv`.
    pub fn new(raw_file: &str, paths: &PathsConfig) -> Result<Self> {
        validate_file_name("raw_file", raw_file)?;
        validate_file_extensions("raw_file", &[raw_file.to_string()], RAW_FILE_EXTENSIONS)?;

        let table_name = raw_file.split('.').next().unwrap_or(raw_file).to_string();
        let dataconf = paths.dataconf_dir.trim_end_matches('/');

        let layout = Self {
            format_file: format!("{}/{}.yml", dataconf, table_name),
            schema_file: format!("{}/{}.csv", dataconf, table_name),
            raw_file: format!("{}/{}", paths.data_dir.trim_end_matches('/'), raw_file),
            output_dir: paths.output_dir.clone(),
            table_name,
        };
        layout.validate()?;
        Ok(layout)
    }
}

impl Validate for ProjectLayout {
    fn validate(&self) -> Result<()> {
        validate_path("table_name", &self.table_name)?;
        validate_path("paths.output_dir", &self.output_dir)?;
        Ok(())
    }
}

impl ConfigProvider for ProjectLayout {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn format_file(&self) -> &str {
        &self.format_file
    }

    fn schema_file(&self) -> &str {
        &self.schema_file
    }

    fn raw_file(&self) -> &str {
        &self.raw_file
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }
}
