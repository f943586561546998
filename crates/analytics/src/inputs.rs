//! Coercion and clamping of raw scenario values.
//!
//! Every value goes through the same steps, in this order: coerce the raw value
//! to a number (or fall back to the field's default when it is absent), clamp
//! it into the field's range, and finally convert counts to integers. All later
//! formulas rely on values being in range.

use crate::error::ValidationError;
use core_types::{BusinessParams, KeeperSource, KeepersMode, RawInputs, RawValue, TierMix};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// The valid range and default of one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: Decimal,
    pub max: Decimal,
    /// `None` marks a required field.
    pub default: Option<Decimal>,
}

impl ParamRange {
    const fn required(name: &'static str, min: Decimal, max: Decimal) -> Self {
        Self { name, min, max, default: None }
    }

    const fn optional(name: &'static str, min: Decimal, max: Decimal, default: Decimal) -> Self {
        Self { name, min, max, default: Some(default) }
    }

    pub fn clamp(&self, value: Decimal) -> Decimal {
        clamp(value, self.min, self.max)
    }

    /// Coerces the raw value, applies the default and clamps.
    pub fn resolve(&self, raw: Option<&RawValue>) -> Result<Decimal, ValidationError> {
        let value = match coerce(self.name, raw)? {
            Some(value) => value,
            None => self.default.ok_or(ValidationError::MissingField(self.name))?,
        };

        let clamped = self.clamp(value);
        if clamped != value {
            tracing::debug!(field = self.name, raw = %value, clamped = %clamped, "Input clamped into range");
        }
        Ok(clamped)
    }
}

pub const AD_SPEND: ParamRange = ParamRange::required("ad_spend", dec!(0), dec!(100000));
pub const QUALIFIED_LEADS: ParamRange = ParamRange::required("qualified_leads", dec!(0), dec!(1000));
pub const KEEPERS_COUNT: ParamRange = ParamRange::required("keepers_count", dec!(0), dec!(500));
pub const LEAD_TO_KEEPER_RATE_PCT: ParamRange =
    ParamRange::optional("lead_to_keeper_rate_pct", dec!(0), dec!(100), dec!(0));
pub const AVG_SETTLEMENT: ParamRange =
    ParamRange::optional("avg_settlement", dec!(0), dec!(1000000), dec!(0));
pub const CONTINGENCY_PCT: ParamRange =
    ParamRange::optional("contingency_pct", dec!(0), dec!(100), dec!(0));
pub const REFERRAL_FEE_PCT: ParamRange =
    ParamRange::optional("referral_fee_pct", dec!(0), dec!(100), dec!(0));
pub const VARIABLE_COST_PER_LEAD: ParamRange =
    ParamRange::optional("variable_cost_per_lead", dec!(0), dec!(1000), dec!(0));
pub const FIXED_OVERHEAD: ParamRange =
    ParamRange::optional("fixed_overhead", dec!(0), dec!(50000), dec!(0));
pub const DESIRED_ROI_PCT: ParamRange =
    ParamRange::optional("desired_roi_pct", dec!(0), dec!(1000), dec!(0));
pub const X_AXIS_MAX: ParamRange = ParamRange::optional("x_axis_max", dec!(0), dec!(1000), dec!(0));
pub const MONTHS_IN_OPERATION: ParamRange =
    ParamRange::optional("months_in_operation", dec!(0), dec!(120), dec!(0));
pub const AVG_CASE_DURATION_MONTHS: ParamRange =
    ParamRange::optional("avg_case_duration_months", dec!(1), dec!(60), dec!(12));
pub const CASE_RESOLUTION_PROBABILITY_PCT: ParamRange =
    ParamRange::optional("case_resolution_probability_pct", dec!(0), dec!(100), dec!(85));
pub const TIER_1_PCT: ParamRange = ParamRange::optional("tier_1_pct", dec!(0), dec!(100), dec!(40));
pub const TIER_2_PCT: ParamRange = ParamRange::optional("tier_2_pct", dec!(0), dec!(100), dec!(40));
pub const TIER_3_PCT: ParamRange = ParamRange::optional("tier_3_pct", dec!(0), dec!(100), dec!(20));

/// Restricts `value` to `[min, max]`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// Converts a float to a Decimal, saturating at the Decimal bounds so that
/// huge values still reach the clamp. `None` for NaN.
fn saturating_decimal(value: f64) -> Option<Decimal> {
    if value.is_nan() {
        return None;
    }
    Decimal::from_f64(value).or(Some(if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value > 0.0 {
        Decimal::MAX
    } else {
        Decimal::MIN
    }))
}

/// Reads a raw value as a number.
///
/// Returns `Ok(None)` for absent or blank values. Text may carry thousands
/// separators, `$` signs or a trailing `%`, and may use scientific notation.
/// Numbers beyond the Decimal range saturate rather than fail.
pub fn coerce(field: &'static str, raw: Option<&RawValue>) -> Result<Option<Decimal>, ValidationError> {
    let not_numeric = |value: String| ValidationError::NotNumeric { field, value };

    let text = match raw {
        None => return Ok(None),
        Some(RawValue::Number(value)) => return Ok(Some(*value)),
        Some(RawValue::Float(value)) => {
            return saturating_decimal(*value)
                .map(Some)
                .ok_or_else(|| not_numeric(value.to_string()));
        }
        Some(RawValue::Text(text)) => text,
    };

    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
        .or_else(|| cleaned.parse::<f64>().ok().and_then(saturating_decimal))
        .map(Some)
        .ok_or_else(|| not_numeric(text.clone()))
}

/// Parses the keepers mode. Absent or blank means direct entry.
pub fn keepers_mode(raw: Option<&str>) -> Result<KeepersMode, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(KeepersMode::DirectEntry),
        Some(text) => text
            .parse()
            .map_err(|_| ValidationError::UnknownKeepersMode(text.to_string())),
    }
}

/// Converts an in-range value to a count by dropping the fractional part.
fn to_count(value: Decimal) -> u32 {
    value.trunc().to_u32().unwrap_or_default()
}

/// Rounds an in-range value half-to-even to the nearest count.
fn round_count(value: Decimal) -> u32 {
    value.round().to_u32().unwrap_or_default()
}

/// Coerces and clamps a raw scenario into the parameter set the formulas use.
///
/// Fails only when a required field is missing or a supplied field cannot be
/// read as a number. `keepers_count` is required only in direct-entry mode and
/// is ignored when keepers come from a rate.
pub fn normalize(raw: &RawInputs) -> Result<BusinessParams, ValidationError> {
    let mode = keepers_mode(raw.keepers_mode.as_deref())?;

    let ad_spend = AD_SPEND.resolve(raw.ad_spend.as_ref())?;
    let qualified_leads = to_count(QUALIFIED_LEADS.resolve(raw.qualified_leads.as_ref())?);

    let keeper_source = match mode {
        KeepersMode::DirectEntry => KeeperSource::DirectEntry {
            count: round_count(KEEPERS_COUNT.resolve(raw.keepers_count.as_ref())?),
        },
        KeepersMode::FromRate => KeeperSource::FromRate {
            rate_pct: LEAD_TO_KEEPER_RATE_PCT.resolve(raw.lead_to_keeper_rate_pct.as_ref())?,
        },
    };

    Ok(BusinessParams {
        ad_spend,
        qualified_leads,
        keeper_source,
        avg_settlement: AVG_SETTLEMENT.resolve(raw.avg_settlement.as_ref())?,
        contingency_pct: CONTINGENCY_PCT.resolve(raw.contingency_pct.as_ref())?,
        referral_fee_pct: REFERRAL_FEE_PCT.resolve(raw.referral_fee_pct.as_ref())?,
        variable_cost_per_lead: VARIABLE_COST_PER_LEAD.resolve(raw.variable_cost_per_lead.as_ref())?,
        fixed_overhead: FIXED_OVERHEAD.resolve(raw.fixed_overhead.as_ref())?,
        desired_roi_pct: DESIRED_ROI_PCT.resolve(raw.desired_roi_pct.as_ref())?,
        x_axis_max: to_count(X_AXIS_MAX.resolve(raw.x_axis_max.as_ref())?),
        months_in_operation: to_count(MONTHS_IN_OPERATION.resolve(raw.months_in_operation.as_ref())?),
        avg_case_duration_months: AVG_CASE_DURATION_MONTHS
            .resolve(raw.avg_case_duration_months.as_ref())?,
        case_resolution_probability_pct: CASE_RESOLUTION_PROBABILITY_PCT
            .resolve(raw.case_resolution_probability_pct.as_ref())?,
        tier_mix: TierMix {
            tier_1_pct: TIER_1_PCT.resolve(raw.tier_1_pct.as_ref())?,
            tier_2_pct: TIER_2_PCT.resolve(raw.tier_2_pct.as_ref())?,
            tier_3_pct: TIER_3_PCT.resolve(raw.tier_3_pct.as_ref())?,
        },
    })
}

/// Clamps an already typed parameter set, for callers that build
/// `BusinessParams` themselves instead of going through [`normalize`].
pub fn reclamp(params: &BusinessParams) -> BusinessParams {
    let count = |range: &ParamRange, value: u32| to_count(range.clamp(Decimal::from(value)));

    let keeper_source = match params.keeper_source {
        KeeperSource::DirectEntry { count: keepers } => KeeperSource::DirectEntry {
            count: count(&KEEPERS_COUNT, keepers),
        },
        KeeperSource::FromRate { rate_pct } => KeeperSource::FromRate {
            rate_pct: LEAD_TO_KEEPER_RATE_PCT.clamp(rate_pct),
        },
    };

    BusinessParams {
        ad_spend: AD_SPEND.clamp(params.ad_spend),
        qualified_leads: count(&QUALIFIED_LEADS, params.qualified_leads),
        keeper_source,
        avg_settlement: AVG_SETTLEMENT.clamp(params.avg_settlement),
        contingency_pct: CONTINGENCY_PCT.clamp(params.contingency_pct),
        referral_fee_pct: REFERRAL_FEE_PCT.clamp(params.referral_fee_pct),
        variable_cost_per_lead: VARIABLE_COST_PER_LEAD.clamp(params.variable_cost_per_lead),
        fixed_overhead: FIXED_OVERHEAD.clamp(params.fixed_overhead),
        desired_roi_pct: DESIRED_ROI_PCT.clamp(params.desired_roi_pct),
        x_axis_max: count(&X_AXIS_MAX, params.x_axis_max),
        months_in_operation: count(&MONTHS_IN_OPERATION, params.months_in_operation),
        avg_case_duration_months: AVG_CASE_DURATION_MONTHS.clamp(params.avg_case_duration_months),
        case_resolution_probability_pct: CASE_RESOLUTION_PROBABILITY_PCT
            .clamp(params.case_resolution_probability_pct),
        tier_mix: TierMix {
            tier_1_pct: TIER_1_PCT.clamp(params.tier_mix.tier_1_pct),
            tier_2_pct: TIER_2_PCT.clamp(params.tier_mix.tier_2_pct),
            tier_3_pct: TIER_3_PCT.clamp(params.tier_mix.tier_3_pct),
        },
    }
}
