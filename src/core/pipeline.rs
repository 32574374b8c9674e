use crate::config::format::FileFormat;
use crate::core::checktable::CheckTable;
use crate::core::report::{render, AnalysisType};
use crate::core::table::Table;
use crate::core::{ConfigProvider, Findings, Pipeline, Storage};
use crate::domain::schema::Schema;
use crate::utils::error::{CheckError, Result};

/// The three input files of a table, parsed except for the raw data.
#[derive(Debug)]
pub struct TableInputs {
    pub format: FileFormat,
    pub schema: Schema,
    pub raw: Vec<u8>,
}

pub struct CheckPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    analyses: Vec<AnalysisType>,
}

impl<S: Storage, C: ConfigProvider> CheckPipeline<S, C> {
    pub fn new(storage: S, config: C, analyses: Vec<AnalysisType>) -> Self {
        Self {
            storage,
            config,
            analyses,
        }
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path).await?;
        String::from_utf8(bytes).map_err(|e| CheckError::EncodingError {
            encoding: "utf_8".to_string(),
            message: format!("{}: invalid byte sequence at offset {}", path, e.utf8_error().valid_up_to()),
        })
    }

    /// Renders every requested report without writing it.
    pub fn render_reports(&self, findings: &Findings) -> Vec<(AnalysisType, String)> {
        self.analyses
            .iter()
            .map(|analysis| (*analysis, render(findings, *analysis)))
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CheckPipeline<S, C> {
    type Input = TableInputs;

    async fn extract(&self) -> Result<TableInputs> {
        tracing::debug!("Reading format file: {}", self.config.format_file());
        let format = FileFormat::from_yaml_str(&self.read_text(self.config.format_file()).await?)?;

        tracing::debug!("Reading column file: {}", self.config.schema_file());
        let schema = Schema::from_csv_reader(self.read_text(self.config.schema_file()).await?.as_bytes())?;

        tracing::debug!("Reading raw data: {}", self.config.raw_file());
        let raw = self.storage.read_file(self.config.raw_file()).await?;

        Ok(TableInputs { format, schema, raw })
    }

    async fn transform(&self, input: TableInputs) -> Result<Findings> {
        let table = Table::read(input.raw, &input.format, &input.schema)?;
        let check = CheckTable::new(self.config.table_name(), input.schema, table);
        Ok(check.findings())
    }

    async fn load(&self, findings: &Findings) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(self.analyses.len());

        for (analysis, report) in self.render_reports(findings) {
            let path = analysis.output_file(self.config.output_dir(), self.config.table_name());
            tracing::debug!("Writing {} report ({} bytes) to {}", analysis.suffix(), report.len(), path);
            self.storage.write_file(&path, report.as_bytes()).await?;
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CheckError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn table_name(&self) -> &str {
            "fruits"
        }

        fn format_file(&self) -> &str {
            "dataconf/fruits.yml"
        }

        fn schema_file(&self) -> &str {
            "dataconf/fruits.csv"
        }

        fn raw_file(&self) -> &str {
            "data/fruits.csv"
        }

        fn output_dir(&self) -> &str {
            "output"
        }
    }

    async fn storage_with_fruits(raw: &str) -> MockStorage {
        let storage = MockStorage::new();
        storage
            .put("dataconf/fruits.yml", "delimiter: ','\nencoding: 'utf_8'\nna_value: ''\n")
            .await;
        storage
            .put(
                "dataconf/fruits.csv",
                "physical_column_name,pk,not_null_constraint,data_type\n\
name,1,1,VARCHAR(6)\n\
stock,0,1,SMALLINT\n",
            )
            .await;
        storage.put("data/fruits.csv", raw).await;
        storage
    }

    #[tokio::test]
    async fn test_extract_reads_all_inputs() {
        let storage = storage_with_fruits("apple,3\n").await;
        let pipeline = CheckPipeline::new(storage, MockConfig, vec![AnalysisType::Summary]);

        let input = pipeline.extract().await.unwrap();

        assert_eq!(input.format.delimiter_byte().unwrap(), b',');
        assert_eq!(input.schema.len(), 2);
        assert_eq!(input.raw, b"apple,3\n".to_vec());
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::new();
        let pipeline = CheckPipeline::new(storage, MockConfig, vec![AnalysisType::Summary]);

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(CheckError::IoError(_))));
    }

    #[tokio::test]
    async fn test_transform_finds_errors() {
        let storage = storage_with_fruits("apple,3\nbanana!,\napple,5\n").await;
        let pipeline = CheckPipeline::new(storage, MockConfig, vec![AnalysisType::Summary]);

        let input = pipeline.extract().await.unwrap();
        let findings = pipeline.transform(input).await.unwrap();

        assert_eq!(findings.table_name, "fruits");
        assert_eq!(findings.row_count, 3);
        assert_eq!(findings.size_errors, vec!["name".to_string()]);
        assert_eq!(findings.not_null_errors, vec!["stock".to_string()]);
        assert!(findings.superkey_error);
    }

    #[tokio::test]
    async fn test_load_writes_each_requested_report() {
        let storage = storage_with_fruits("apple,3\nkiwi,4\n").await;
        let pipeline = CheckPipeline::new(
            storage.clone(),
            MockConfig,
            vec![AnalysisType::Summary, AnalysisType::Detail],
        );

        let input = pipeline.extract().await.unwrap();
        let findings = pipeline.transform(input).await.unwrap();
        let written = pipeline.load(&findings).await.unwrap();

        assert_eq!(
            written,
            vec!["output/fruits-summary.txt".to_string(), "output/fruits-detail.txt".to_string()]
        );

        let summary = storage.get_file("output/fruits-summary.txt").await.unwrap();
        assert!(summary.is_empty());

        let detail = String::from_utf8(storage.get_file("output/fruits-detail.txt").await.unwrap()).unwrap();
        assert_eq!(
            detail,
            "SIZE ERROR\n----------\n\tCOLUMN  MAX SIZE\n\tname : 5\n\tstock: 4\n\n\
NOT-NULL CONSTRAINT ERROR\n-------------------------\n\tCOLUMN  NULL COUNT\n\tname : 0\n\tstock: 0\n\n"
        );
    }
}
