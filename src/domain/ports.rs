use crate::domain::model::Findings;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the three input files and the reports live, relative to the
/// storage root.
pub trait ConfigProvider: Send + Sync {
    fn table_name(&self) -> &str;
    fn format_file(&self) -> &str;
    fn schema_file(&self) -> &str;
    fn raw_file(&self) -> &str;
    fn output_dir(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Input: Send;

    async fn extract(&self) -> Result<Self::Input>;
    async fn transform(&self, input: Self::Input) -> Result<Findings>;
    async fn load(&self, findings: &Findings) -> Result<Vec<String>>;
}
