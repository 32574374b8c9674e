use crate::core::{Findings, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Result of one run: the reports written and what was found.
#[derive(Debug)]
pub struct CheckOutcome {
    pub written: Vec<String>,
    pub findings: Findings,
}

impl CheckOutcome {
    pub fn has_errors(&self) -> bool {
        self.findings.has_errors()
    }
}

pub struct CheckEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CheckEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<CheckOutcome> {
        tracing::info!("Starting table check");

        tracing::info!("Reading input files...");
        let input = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        tracing::info!("Checking columns...");
        let findings = self.pipeline.transform(input).await?;
        tracing::info!(
            "Checked {} rows of table '{}'",
            findings.row_count,
            findings.table_name
        );
        self.monitor.log_stats("Check");

        if findings.has_errors() {
            tracing::warn!(
                "Found {} size errors, {} not-null constraint errors, superkey error: {}",
                findings.size_errors.len(),
                findings.not_null_errors.len(),
                findings.superkey_error
            );
            if !findings.type_errors.is_empty() {
                tracing::warn!("{} columns contain values of the wrong type", findings.type_errors.len());
            }
        } else {
            tracing::info!("No errors found");
        }

        tracing::info!("Writing reports...");
        let written = self.pipeline.load(&findings).await?;
        for path in &written {
            tracing::info!("Report saved to: {}", path);
        }
        self.monitor.log_stats("Report");
        self.monitor.log_final_stats();

        Ok(CheckOutcome { written, findings })
    }
}
