//! Lifecycle KPIs for a business whose revenue arrives only once cases resolve.
//!
//! These are closed-form approximations from the static monthly parameters, not
//! a simulation. Several ratios divide by the single-month `total_costs` scaled
//! by a month count rather than by a true cumulative cost series.

use crate::economics::{pct, ratio_or_zero, CoreEconomics};
use crate::format;
use core_types::{BusinessParams, TierMix};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Length of the rolling window used by the adjusted lifetime ROI.
pub const LIFETIME_WINDOW_MONTHS: u32 = 36;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedKpis {
    pub months_in_operation: u32,
    pub avg_case_duration_months: Decimal,
    /// Probability a signed case resolves with a payout, as a fraction.
    pub case_resolution_probability: Decimal,
    /// Tier shares after renormalisation.
    pub tier_mix: TierMix,

    pub total_keepers_accumulated: u64,
    pub deferred_revenue_pipeline: Decimal,
    pub twelve_month_weighted_roi: Decimal,
    pub monthly_referral_income: Decimal,
    pub cash_flow_coverage_ratio: Decimal,
    pub case_maturity_distribution: String,
    pub received_referral_fees: Decimal,
    pub cumulative_costs: Decimal,
    pub realized_referral_margin: Decimal,
    pub window_months: u32,
    pub adjusted_lifetime_roi: Decimal,
    /// Time between ad spend and first payout, approximated by case duration.
    pub capital_lockup_period_months: Decimal,
}

/// Scales the tier shares so they sum to 100. A mix summing to 0 is returned as-is.
pub fn normalize_tiers(mix: TierMix) -> TierMix {
    let total = mix.total();
    if total <= Decimal::ZERO {
        return mix;
    }
    let scale = |share: Decimal| share / total * Decimal::ONE_HUNDRED;
    TierMix {
        tier_1_pct: scale(mix.tier_1_pct),
        tier_2_pct: scale(mix.tier_2_pct),
        tier_3_pct: scale(mix.tier_3_pct),
    }
}

/// Formats a tier mix as `"40% / 40% / 20%"`.
pub fn maturity_distribution(mix: &TierMix) -> String {
    format!(
        "{}% / {}% / {}%",
        format::fixed(mix.tier_1_pct, 0),
        format::fixed(mix.tier_2_pct, 0),
        format::fixed(mix.tier_3_pct, 0),
    )
}

/// Average monthly referral income from cases that have matured.
///
/// Cases only pay out once `avg_case_duration_months` have elapsed, so nothing
/// has been received before then.
pub fn monthly_referral_income(
    keepers: u32,
    fee_per_case: Decimal,
    months_in_operation: u32,
    avg_case_duration_months: Decimal,
    resolution_probability: Decimal,
) -> Decimal {
    let months = Decimal::from(months_in_operation);
    if months < avg_case_duration_months {
        return Decimal::ZERO;
    }

    let realized_months = months - avg_case_duration_months;
    let realized_keepers = Decimal::from(keepers) * realized_months;
    realized_keepers * fee_per_case * resolution_probability / months.max(Decimal::ONE)
}

/// Calculates the time-based margin KPIs.
pub fn calculate(params: &BusinessParams, economics: &CoreEconomics) -> TimeBasedKpis {
    let fee = economics.avg_referral_fee_per_case;
    let total_costs = economics.total_costs;
    let months_in_operation = params.months_in_operation;
    let months = Decimal::from(months_in_operation);
    let duration = params.avg_case_duration_months;
    let resolution_probability = pct(params.case_resolution_probability_pct)
        .max(Decimal::ZERO)
        .min(Decimal::ONE);
    let tier_mix = normalize_tiers(params.tier_mix);

    // 1. Deferred revenue pipeline
    let total_keepers_accumulated = u64::from(economics.keepers) * u64::from(months_in_operation);
    let expected_value = Decimal::from(total_keepers_accumulated) * fee * resolution_probability;

    // 2. ROI normalised by case duration
    let twelve_month_weighted_roi =
        ratio_or_zero(economics.gross_revenue, total_costs * (duration / dec!(12)));

    // 3. Cash flow coverage
    let monthly_referral_income = monthly_referral_income(
        economics.keepers,
        fee,
        months_in_operation,
        duration,
        resolution_probability,
    );
    let cash_flow_coverage_ratio = ratio_or_zero(monthly_referral_income, params.ad_spend);

    // 5. Realized referral margin
    let received_referral_fees = monthly_referral_income * months;
    let cumulative_costs = total_costs * months;
    let realized_referral_margin =
        ratio_or_zero(received_referral_fees - cumulative_costs, cumulative_costs);

    // 6. Adjusted lifetime ROI over a rolling window
    let window_months = months_in_operation.min(LIFETIME_WINDOW_MONTHS);
    let window_costs = total_costs * Decimal::from(window_months);
    let adjusted_lifetime_roi = ratio_or_zero(expected_value - window_costs, window_costs);

    TimeBasedKpis {
        months_in_operation,
        avg_case_duration_months: duration,
        case_resolution_probability: resolution_probability,
        case_maturity_distribution: maturity_distribution(&tier_mix),
        tier_mix,
        total_keepers_accumulated,
        deferred_revenue_pipeline: expected_value,
        twelve_month_weighted_roi,
        monthly_referral_income,
        cash_flow_coverage_ratio,
        received_referral_fees,
        cumulative_costs,
        realized_referral_margin,
        window_months,
        adjusted_lifetime_roi,
        capital_lockup_period_months: duration,
    }
}
