use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use core_types::RawInputs;
use std::path::Path;

/// Prefix of the environment variables that override scenario fields,
/// e.g. `KPI_SCENARIO_AD_SPEND=12000`.
pub const SCENARIO_ENV_PREFIX: &str = "KPI_SCENARIO";

/// Loads a scenario from a TOML file, or the built-in demo scenario when no
/// path is given. `KPI_SCENARIO_*` environment variables override either.
///
/// Values are not validated here. The KPI engine decides what is required and
/// clamps what is out of range.
pub fn load_scenario(path: Option<&Path>) -> Result<RawInputs, ConfigError> {
    let builder = config::Config::builder();
    let builder = match path {
        Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml).required(true)),
        None => builder.add_source(config::Config::try_from(&RawInputs::demo())?),
    };

    let scenario = builder
        .add_source(
            Environment::with_prefix(SCENARIO_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<RawInputs>()?;

    tracing::debug!(source = ?path, "Scenario loaded");
    Ok(scenario)
}

/// Renders a scenario as TOML-ready `key = value` lines, in field order.
pub fn scenario_to_toml_lines(raw: &RawInputs) -> Vec<String> {
    use core_types::RawValue;

    let value = |v: &Option<RawValue>| match v {
        Some(RawValue::Number(n)) => Some(n.to_string()),
        Some(RawValue::Float(f)) => Some(format!("{f:e}")),
        Some(RawValue::Text(t)) => Some(format!("{t:?}")),
        None => None,
    };

    let fields: [(&str, Option<String>); 18] = [
        ("ad_spend", value(&raw.ad_spend)),
        ("qualified_leads", value(&raw.qualified_leads)),
        ("keepers_mode", raw.keepers_mode.as_ref().map(|m| format!("{m:?}"))),
        ("keepers_count", value(&raw.keepers_count)),
        ("lead_to_keeper_rate_pct", value(&raw.lead_to_keeper_rate_pct)),
        ("avg_settlement", value(&raw.avg_settlement)),
        ("contingency_pct", value(&raw.contingency_pct)),
        ("referral_fee_pct", value(&raw.referral_fee_pct)),
        ("variable_cost_per_lead", value(&raw.variable_cost_per_lead)),
        ("fixed_overhead", value(&raw.fixed_overhead)),
        ("desired_roi_pct", value(&raw.desired_roi_pct)),
        ("x_axis_max", value(&raw.x_axis_max)),
        ("months_in_operation", value(&raw.months_in_operation)),
        ("avg_case_duration_months", value(&raw.avg_case_duration_months)),
        ("case_resolution_probability_pct", value(&raw.case_resolution_probability_pct)),
        ("tier_1_pct", value(&raw.tier_1_pct)),
        ("tier_2_pct", value(&raw.tier_2_pct)),
        ("tier_3_pct", value(&raw.tier_3_pct)),
    ];

    fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key} = {v}")))
        .collect()
}
