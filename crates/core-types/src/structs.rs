use crate::enums::KeepersMode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A single input value as it arrives from a form, a scenario file or the environment.
///
/// Numbers are accepted as-is; text is kept so the engine can attempt its own
/// coercion (and report the exact value when that fails).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(Decimal),
    Text(String),
    /// A number outside the Decimal range, e.g. `1e40`. The engine saturates
    /// it before clamping.
    Float(f64),
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(Decimal::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// The unvalidated parameter set supplied by an external caller.
///
/// Every field is optional at this level. Which ones are required, and what the
/// others default to, is decided by the KPI engine during coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_spend: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_leads: Option<RawValue>,
    /// "Direct entry" / "From rate (%)" or one of their short aliases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepers_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepers_count: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_to_keeper_rate_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_settlement: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contingency_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_fee_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_cost_per_lead: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_overhead: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_roi_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_max: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_in_operation: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_case_duration_months: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_resolution_probability_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_1_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_2_pct: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_3_pct: Option<RawValue>,
}

impl RawInputs {
    /// The demonstration scenario the model ships with: a $9k/month campaign
    /// producing 60 qualified leads and 5 signed cases.
    pub fn demo() -> Self {
        Self {
            ad_spend: Some(dec!(9000).into()),
            qualified_leads: Some(dec!(60).into()),
            keepers_mode: Some(KeepersMode::DirectEntry.label().to_string()),
            keepers_count: Some(dec!(5).into()),
            lead_to_keeper_rate_pct: Some(dec!(8.0).into()),
            avg_settlement: Some(dec!(36000).into()),
            contingency_pct: Some(dec!(33.3).into()),
            referral_fee_pct: Some(dec!(25.0).into()),
            variable_cost_per_lead: Some(dec!(25).into()),
            fixed_overhead: Some(dec!(1500).into()),
            desired_roi_pct: Some(dec!(100.0).into()),
            x_axis_max: Some(dec!(0).into()),
            months_in_operation: Some(dec!(12).into()),
            avg_case_duration_months: Some(dec!(12.0).into()),
            case_resolution_probability_pct: Some(dec!(85.0).into()),
            tier_1_pct: Some(dec!(40.0).into()),
            tier_2_pct: Some(dec!(40.0).into()),
            tier_3_pct: Some(dec!(20.0).into()),
        }
    }
}

/// Where the keeper count of a scenario comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum KeeperSource {
    /// A keeper count stated directly, already clamped and rounded.
    DirectEntry { count: u32 },
    /// A lead-to-keeper conversion rate in percent, already clamped to [0, 100].
    FromRate { rate_pct: Decimal },
}

impl KeeperSource {
    pub fn mode(&self) -> KeepersMode {
        match self {
            KeeperSource::DirectEntry { .. } => KeepersMode::DirectEntry,
            KeeperSource::FromRate { .. } => KeepersMode::FromRate,
        }
    }
}

/// Share of cases resolving in each maturity bucket (6-12, 12-24, 24-36 months).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMix {
    pub tier_1_pct: Decimal,
    pub tier_2_pct: Decimal,
    pub tier_3_pct: Decimal,
}

impl TierMix {
    pub fn total(&self) -> Decimal {
        self.tier_1_pct + self.tier_2_pct + self.tier_3_pct
    }
}

/// The fully coerced and clamped parameter set every KPI formula works from.
///
/// Values in this struct are guaranteed to lie inside their documented ranges,
/// so downstream code never re-validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessParams {
    /// Monthly ad spend, [0, 100000].
    pub ad_spend: Decimal,
    /// Qualified leads per month, [0, 1000].
    pub qualified_leads: u32,
    pub keeper_source: KeeperSource,
    /// Average settlement per case, [0, 1000000].
    pub avg_settlement: Decimal,
    /// Law firm contingency fee in percent of settlement.
    pub contingency_pct: Decimal,
    /// Share of the contingency fee paid out as referral fee, in percent.
    pub referral_fee_pct: Decimal,
    /// Other variable cost per lead, [0, 1000].
    pub variable_cost_per_lead: Decimal,
    /// Fixed overhead per month, [0, 50000].
    pub fixed_overhead: Decimal,
    /// Target ROI in percent, [0, 1000].
    pub desired_roi_pct: Decimal,
    /// Upper bound of the chart x-axis. 0 means auto-scale.
    pub x_axis_max: u32,
    /// [0, 120].
    pub months_in_operation: u32,
    /// [1, 60].
    pub avg_case_duration_months: Decimal,
    pub case_resolution_probability_pct: Decimal,
    pub tier_mix: TierMix,
}
