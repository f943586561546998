use crate::economics::{CoreEconomics, TargetRoi};
use crate::format::{cash, cash_or_unbounded, count_or_undefined, fixed, grouped, signed_pct};
use crate::time_based::TimeBasedKpis;
use core_types::BusinessParams;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// The complete set of KPIs for one scenario.
///
/// This struct is the report half of the `KpiEngine` output. It serialises
/// cleanly for JSON export and renders the fixed text layout through
/// [`KpiReport::render`] / `Display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    /// The clamped parameters the KPIs were computed from.
    pub params: BusinessParams,
    pub economics: CoreEconomics,
    pub target: TargetRoi,
    pub time_based: TimeBasedKpis,
}

impl KpiReport {
    /// Renders the multi-line text report.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_core(&self, out: &mut impl Write) -> fmt::Result {
        let p = &self.params;
        let e = &self.economics;
        let t = &self.target;
        let hundred = Decimal::ONE_HUNDRED;

        writeln!(out, "KPIs")?;
        writeln!(out, "-------------")?;
        writeln!(out, "Qualified Leads: {}", grouped(e.qualified_leads.into(), 0))?;
        writeln!(out, "Keepers (signed cases): {}", grouped(e.keepers.into(), 0))?;
        writeln!(out, "Lead → Keeper Rate: {}%", grouped(e.lead_to_keeper_ratio * hundred, 1))?;
        writeln!(out)?;
        writeln!(out, "Avg Settlement: {}", cash(p.avg_settlement))?;
        writeln!(out, "Contingency %: {}%", fixed(p.contingency_pct, 1))?;
        writeln!(out, "Referral Fee %: {}%", fixed(p.referral_fee_pct, 1))?;
        writeln!(out, "Avg Referral Fee / Keeper: {}", cash(e.avg_referral_fee_per_case))?;
        writeln!(out)?;
        writeln!(out, "Ad Spend: {}", cash(p.ad_spend))?;
        writeln!(
            out,
            "Other Variable Costs (Leads × {}): {}",
            cash(p.variable_cost_per_lead),
            cash(e.variable_cost_total)
        )?;
        writeln!(out, "Fixed Overhead: {}", cash(p.fixed_overhead))?;
        writeln!(out, "Total Costs: {}", cash(e.total_costs))?;
        writeln!(out)?;
        writeln!(out, "Gross Revenue (Keepers × Avg Referral Fee): {}", cash(e.gross_revenue))?;
        writeln!(out, "Net Profit: {}", cash(e.net_profit))?;
        writeln!(out, "ROI (Net ÷ Costs): {}%", grouped(e.roi * hundred, 1))?;
        writeln!(out)?;
        writeln!(out, "CPK (Total Costs ÷ Keepers): {}", cash_or_unbounded(e.cpk))?;
        writeln!(
            out,
            "Breakeven Keepers (Net=0): {}",
            count_or_undefined(e.breakeven_keepers)
        )?;
        writeln!(out)?;
        writeln!(out, "Target ROI: {}%", fixed(t.desired_roi_pct, 1))?;
        writeln!(
            out,
            "Max Allowed Total Costs for Target ROI: {}",
            cash(t.allowed_costs_for_target_roi)
        )?;
        writeln!(
            out,
            "Max Ad Spend for Target ROI (given other costs): {}",
            cash(t.remaining_ad_budget_for_target_roi)
        )
    }

    fn write_time_based(&self, out: &mut impl Write) -> fmt::Result {
        let k = &self.time_based;

        writeln!(out, "TIME-BASED MARGIN KPIs (6–36 Month Lifecycle)")?;
        writeln!(out, "---------------------------------------------")?;
        writeln!(out, "Months in Operation: {}", k.months_in_operation)?;
        writeln!(out, "Avg Case Duration: {} months", fixed(k.avg_case_duration_months, 1))?;
        writeln!(
            out,
            "Case Resolution Probability: {}%",
            fixed(k.case_resolution_probability * Decimal::ONE_HUNDRED, 1)
        )?;
        writeln!(out)?;
        writeln!(out, "Deferred Revenue Pipeline: {}", cash(k.deferred_revenue_pipeline))?;
        writeln!(out, "    Target: $250,000+ after 6 months")?;
        writeln!(out)?;
        writeln!(out, "12-Month Weighted ROI: {}×", fixed(k.twelve_month_weighted_roi, 2))?;
        writeln!(out, "    Target: ≥ 1.5× at 12 months")?;
        writeln!(out)?;
        writeln!(out, "Cash Flow Coverage Ratio: {}×", fixed(k.cash_flow_coverage_ratio, 2))?;
        writeln!(out, "    Target: 0.5× at 6 months → 2.0× by month 18")?;
        writeln!(out)?;
        writeln!(
            out,
            "Case Maturity Distribution (6-12 / 12-24 / 24-36 months): {}",
            k.case_maturity_distribution
        )?;
        writeln!(out, "    Target: 40% / 40% / 20% split by volume")?;
        writeln!(out)?;
        writeln!(
            out,
            "Realized Referral Margin (RRM): {}",
            signed_pct(k.realized_referral_margin, 1)
        )?;
        writeln!(out, "    Target: +25% by month 12; +200% by month 36")?;
        writeln!(out)?;
        writeln!(out, "Adjusted Lifetime ROI (ALROI): {}×", fixed(k.adjusted_lifetime_roi, 2))?;
        writeln!(out, "    Target: ≥ 4× within 3 years")?;
        writeln!(out)?;
        writeln!(
            out,
            "Capital Lockup Period: {} months",
            fixed(k.capital_lockup_period_months, 1)
        )?;
        writeln!(out, "    Target: ≤ 12 months median")
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_core(f)?;
        writeln!(f)?;
        self.write_time_based(f)
    }
}
