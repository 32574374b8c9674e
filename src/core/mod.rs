pub mod checktable;
pub mod etl;
pub mod pipeline;
pub mod redshift;
pub mod report;
pub mod table;

pub use crate::domain::model::{Findings, MaxSize, Value};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
