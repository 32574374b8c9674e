pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use crate::config::{format::FileFormat, toml_config::ProjectConfig, ProjectLayout};
pub use crate::core::{
    checktable::CheckTable,
    etl::{CheckEngine, CheckOutcome},
    pipeline::CheckPipeline,
    report::AnalysisType,
};
pub use domain::schema::Schema;
pub use utils::error::{CheckError, Result};
