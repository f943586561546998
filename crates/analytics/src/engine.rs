use crate::error::ValidationError;
use crate::report::KpiReport;
use crate::series::{ChartMarkers, Series};
use crate::{economics, inputs, series, time_based};
use core_types::{BusinessParams, RawInputs};
use serde::{Deserialize, Serialize};

/// The result of one engine run: the report plus the two chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiOutput {
    pub report: KpiReport,
    pub net_profit: Series,
    pub roi: Series,
    pub markers: ChartMarkers,
}

impl KpiOutput {
    pub fn report_text(&self) -> String {
        self.report.render()
    }
}

/// A stateless calculator for the referral business KPIs.
#[derive(Debug, Default)]
pub struct KpiEngine {}

impl KpiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating KPIs from caller-supplied values.
    ///
    /// # Arguments
    ///
    /// * `raw` - The scenario as supplied by the caller. Values are coerced and
    ///   clamped into range before any formula runs.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `KpiOutput`, or a `ValidationError` when a
    /// required field is missing or a value is not a number.
    pub fn compute(&self, raw: &RawInputs) -> Result<KpiOutput, ValidationError> {
        let params = inputs::normalize(raw)?;
        Ok(self.calculate(params))
    }

    /// Calculates KPIs from an already typed parameter set. The parameters are
    /// clamped again, so this never fails.
    pub fn compute_params(&self, params: &BusinessParams) -> KpiOutput {
        self.calculate(inputs::reclamp(params))
    }

    fn calculate(&self, params: BusinessParams) -> KpiOutput {
        let core = economics::calculate(&params);
        let target = economics::target_roi(&params, &core);
        let lifecycle = time_based::calculate(&params, &core);
        let bundle = series::generate(&params, &core);

        tracing::info!(
            keepers = core.keepers,
            total_costs = %core.total_costs,
            net_profit = %core.net_profit,
            roi = %core.roi,
            xmax = bundle.markers.xmax,
            "KPI calculation complete"
        );

        KpiOutput {
            report: KpiReport {
                params,
                economics: core,
                target,
                time_based: lifecycle,
            },
            net_profit: bundle.net_profit,
            roi: bundle.roi,
            markers: bundle.markers,
        }
    }
}
