use clap::Args;
use core_types::{RawInputs, RawValue};

/// Per-field command-line overrides, applied on top of a loaded scenario.
///
/// Values are passed through as text so the engine coerces them exactly like
/// form input.
#[derive(Debug, Clone, Default, Args)]
pub struct ScenarioOverrides {
    /// Monthly ad spend ($, max 100,000).
    #[arg(long)]
    pub ad_spend: Option<String>,
    /// Qualified leads per month (max 1,000).
    #[arg(long)]
    pub qualified_leads: Option<String>,
    /// "direct" or "rate".
    #[arg(long)]
    pub keepers_mode: Option<String>,
    /// Keepers (signed cases), used in direct mode (max 500).
    #[arg(long)]
    pub keepers_count: Option<String>,
    /// Lead-to-keeper rate (%), used in rate mode.
    #[arg(long)]
    pub lead_to_keeper_rate_pct: Option<String>,
    /// Average settlement ($, max 1,000,000).
    #[arg(long)]
    pub avg_settlement: Option<String>,
    #[arg(long)]
    pub contingency_pct: Option<String>,
    #[arg(long)]
    pub referral_fee_pct: Option<String>,
    /// Other variable cost per lead ($, max 1,000).
    #[arg(long)]
    pub variable_cost_per_lead: Option<String>,
    /// Fixed overhead per month ($, max 50,000).
    #[arg(long)]
    pub fixed_overhead: Option<String>,
    /// Target ROI (%, max 1000).
    #[arg(long)]
    pub desired_roi_pct: Option<String>,
    /// X-axis max keepers (0 = auto).
    #[arg(long)]
    pub x_axis_max: Option<String>,
    #[arg(long)]
    pub months_in_operation: Option<String>,
    #[arg(long)]
    pub avg_case_duration_months: Option<String>,
    #[arg(long)]
    pub case_resolution_probability_pct: Option<String>,
    /// Share of cases resolving within 6-12 months (%).
    #[arg(long)]
    pub tier_1_pct: Option<String>,
    /// Share of cases resolving within 12-24 months (%).
    #[arg(long)]
    pub tier_2_pct: Option<String>,
    /// Share of cases resolving within 24-36 months (%).
    #[arg(long)]
    pub tier_3_pct: Option<String>,
}

impl ScenarioOverrides {
    /// Replaces every field of `raw` that was given on the command line.
    pub fn apply(&self, raw: &mut RawInputs) {
        fn set(target: &mut Option<RawValue>, value: &Option<String>) {
            if let Some(value) = value {
                *target = Some(RawValue::Text(value.clone()));
            }
        }

        set(&mut raw.ad_spend, &self.ad_spend);
        set(&mut raw.qualified_leads, &self.qualified_leads);
        if let Some(mode) = &self.keepers_mode {
            raw.keepers_mode = Some(mode.clone());
        }
        set(&mut raw.keepers_count, &self.keepers_count);
        set(&mut raw.lead_to_keeper_rate_pct, &self.lead_to_keeper_rate_pct);
        set(&mut raw.avg_settlement, &self.avg_settlement);
        set(&mut raw.contingency_pct, &self.contingency_pct);
        set(&mut raw.referral_fee_pct, &self.referral_fee_pct);
        set(&mut raw.variable_cost_per_lead, &self.variable_cost_per_lead);
        set(&mut raw.fixed_overhead, &self.fixed_overhead);
        set(&mut raw.desired_roi_pct, &self.desired_roi_pct);
        set(&mut raw.x_axis_max, &self.x_axis_max);
        set(&mut raw.months_in_operation, &self.months_in_operation);
        set(&mut raw.avg_case_duration_months, &self.avg_case_duration_months);
        set(&mut raw.case_resolution_probability_pct, &self.case_resolution_probability_pct);
        set(&mut raw.tier_1_pct, &self.tier_1_pct);
        set(&mut raw.tier_2_pct, &self.tier_2_pct);
        set(&mut raw.tier_3_pct, &self.tier_3_pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_fields_are_replaced() {
        let mut raw = RawInputs::demo();
        let overrides = ScenarioOverrides {
            ad_spend: Some("12000".to_string()),
            keepers_mode: Some("rate".to_string()),
            ..Default::default()
        };
        overrides.apply(&mut raw);

        assert_eq!(raw.ad_spend, Some(RawValue::Text("12000".to_string())));
        assert_eq!(raw.keepers_mode.as_deref(), Some("rate"));
        assert_eq!(raw.qualified_leads, RawInputs::demo().qualified_leads);
    }
}
