//! Single-month unit economics: revenue, costs, ROI and the target-ROI budget.

use core_types::{BusinessParams, KeeperSource};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Core profitability metrics for one month of operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreEconomics {
    pub qualified_leads: u32,
    pub keepers: u32,
    /// keepers / qualified_leads, 0 with no leads.
    pub lead_to_keeper_ratio: Decimal,
    pub avg_referral_fee_per_case: Decimal,
    pub gross_revenue: Decimal,
    pub variable_cost_total: Decimal,
    pub total_costs: Decimal,
    pub net_profit: Decimal,
    /// net_profit / total_costs as a fraction, 0 when there are no costs.
    pub roi: Decimal,
    pub cpk: Option<Decimal>, // Option<> because it is unbounded with zero keepers
    /// A whole number; `None` with a zero fee per case. It can exceed any
    /// integer type when the fee is tiny, so it stays a Decimal.
    pub breakeven_keepers: Option<Decimal>,
}

impl CoreEconomics {
    pub fn cpk_is_unbounded(&self) -> bool {
        self.cpk.is_none()
    }
}

/// What the cost side may look like for the target ROI to be met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRoi {
    pub desired_roi_pct: Decimal,
    pub allowed_costs_for_target_roi: Decimal,
    /// Ad budget left once variable costs and overhead are paid for. Negative
    /// when the target cannot be met at any ad spend.
    pub remaining_ad_budget_for_target_roi: Decimal,
}

/// Converts a percentage to a fraction.
pub(crate) fn pct(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

/// Division with the engine's zero-denominator convention: `None` when the
/// denominator is zero (or the quotient would not fit a Decimal).
pub(crate) fn checked_ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}

/// Division that yields 0 for a zero denominator.
pub(crate) fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    checked_ratio(numerator, denominator).unwrap_or(Decimal::ZERO)
}

/// Resolves the keeper count from its source.
pub fn derive_keepers(params: &BusinessParams) -> u32 {
    let keepers = match params.keeper_source {
        KeeperSource::DirectEntry { count } => count,
        KeeperSource::FromRate { rate_pct } => {
            let rate = pct(rate_pct).max(Decimal::ZERO).min(Decimal::ONE);
            (rate * Decimal::from(params.qualified_leads))
                .round()
                .to_u32()
                .unwrap_or_default()
        }
    };
    tracing::debug!(mode = %params.keeper_source.mode(), keepers, "Derived keeper count");
    keepers
}

/// Referral fee earned per signed case.
pub fn avg_referral_fee_per_case(params: &BusinessParams) -> Decimal {
    params.avg_settlement * pct(params.contingency_pct) * pct(params.referral_fee_pct)
}

/// The smallest keeper count whose revenue covers `total_costs`.
///
/// Undefined only when there is no fee per case. A quotient too large for a
/// Decimal saturates at `Decimal::MAX`.
pub fn breakeven_keepers(total_costs: Decimal, fee_per_case: Decimal) -> Option<Decimal> {
    if fee_per_case <= Decimal::ZERO {
        return None;
    }
    let Some(quotient) = checked_ratio(total_costs, fee_per_case) else {
        tracing::warn!(%total_costs, %fee_per_case, "Breakeven keeper count saturated");
        return Some(Decimal::MAX);
    };

    let mut keepers = quotient.ceil();
    // The quotient is rounded to 28 significant digits and may land just below
    // the true value.
    while keepers * fee_per_case < total_costs {
        keepers += Decimal::ONE;
    }
    Some(keepers)
}

/// Calculates all core profitability metrics.
pub fn calculate(params: &BusinessParams) -> CoreEconomics {
    let keepers = derive_keepers(params);
    let keepers_dec = Decimal::from(keepers);
    let leads_dec = Decimal::from(params.qualified_leads);

    let avg_referral_fee_per_case = avg_referral_fee_per_case(params);
    let gross_revenue = keepers_dec * avg_referral_fee_per_case;
    let variable_cost_total = leads_dec * params.variable_cost_per_lead;
    let total_costs = params.ad_spend + variable_cost_total + params.fixed_overhead;
    let net_profit = gross_revenue - total_costs;

    CoreEconomics {
        qualified_leads: params.qualified_leads,
        keepers,
        lead_to_keeper_ratio: ratio_or_zero(keepers_dec, leads_dec),
        avg_referral_fee_per_case,
        gross_revenue,
        variable_cost_total,
        total_costs,
        net_profit,
        roi: ratio_or_zero(net_profit, total_costs),
        cpk: checked_ratio(total_costs, keepers_dec),
        breakeven_keepers: breakeven_keepers(total_costs, avg_referral_fee_per_case),
    }
}

/// Inverts the ROI formula: the most the month may cost for revenue to return
/// the desired ROI, and how much of that is left for ads.
pub fn target_roi(params: &BusinessParams, economics: &CoreEconomics) -> TargetRoi {
    // desired_roi_pct is clamped to >= 0, so the denominator is at least 1.
    let allowed_costs_for_target_roi =
        ratio_or_zero(economics.gross_revenue, Decimal::ONE + pct(params.desired_roi_pct));

    TargetRoi {
        desired_roi_pct: params.desired_roi_pct,
        allowed_costs_for_target_roi,
        remaining_ad_budget_for_target_roi: allowed_costs_for_target_roi
            - economics.variable_cost_total
            - params.fixed_overhead,
    }
}
