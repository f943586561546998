use analytics::{KpiOutput, KpiReport};
use charting::ChartPair;
use chrono::{DateTime, Utc};
use core_types::BusinessParams;
use serde::Serialize;
use uuid::Uuid;

/// One `compute` run as written by `--format json`.
#[derive(Debug, Serialize)]
pub struct ExportEnvelope {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// The clamped parameters the report was computed from.
    pub params: BusinessParams,
    pub report: KpiReport,
    /// The text report, exactly as printed in text mode.
    pub report_text: String,
    pub charts: ChartPair,
}

impl ExportEnvelope {
    pub fn new(output: KpiOutput, charts: ChartPair) -> Self {
        let report_text = output.report_text();
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            params: output.report.params.clone(),
            report: output.report,
            report_text,
            charts,
        }
    }
}
