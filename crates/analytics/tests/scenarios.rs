use analytics::{KpiEngine, ValidationError};
use core_types::{KeeperSource, RawInputs};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn demo() -> RawInputs {
    RawInputs::demo()
}

fn zero_cost() -> RawInputs {
    RawInputs {
        ad_spend: Some(dec!(0).into()),
        variable_cost_per_lead: Some(dec!(0).into()),
        fixed_overhead: Some(dec!(0).into()),
        ..demo()
    }
}

const DEMO_REPORT: &str = "\
KPIs
-------------
Qualified Leads: 60
Keepers (signed cases): 5
Lead → Keeper Rate: 8.3%

Avg Settlement: $36,000
Contingency %: 33.3%
Referral Fee %: 25.0%
Avg Referral Fee / Keeper: $2,997

Ad Spend: $9,000
Other Variable Costs (Leads × $25): $1,500
Fixed Overhead: $1,500
Total Costs: $12,000

Gross Revenue (Keepers × Avg Referral Fee): $14,985
Net Profit: $2,985
ROI (Net ÷ Costs): 24.9%

CPK (Total Costs ÷ Keepers): $2,400
Breakeven Keepers (Net=0): 5

Target ROI: 100.0%
Max Allowed Total Costs for Target ROI: $7,492
Max Ad Spend for Target ROI (given other costs): $4,492

TIME-BASED MARGIN KPIs (6–36 Month Lifecycle)
---------------------------------------------
Months in Operation: 12
Avg Case Duration: 12.0 months
Case Resolution Probability: 85.0%

Deferred Revenue Pipeline: $152,847
    Target: $250,000+ after 6 months

12-Month Weighted ROI: 1.25×
    Target: ≥ 1.5× at 12 months

Cash Flow Coverage Ratio: 0.00×
    Target: 0.5× at 6 months → 2.0× by month 18

Case Maturity Distribution (6-12 / 12-24 / 24-36 months): 40% / 40% / 20%
    Target: 40% / 40% / 20% split by volume

Realized Referral Margin (RRM): -100.0%
    Target: +25% by month 12; +200% by month 36

Adjusted Lifetime ROI (ALROI): 0.06×
    Target: ≥ 4× within 3 years

Capital Lockup Period: 12.0 months
    Target: ≤ 12 months median
";

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn demo_scenario_report_text() {
    let output = KpiEngine::new().compute(&demo()).unwrap();
    assert_eq!(output.report_text(), DEMO_REPORT);
}

#[test]
fn demo_scenario_headline_numbers() {
    let output = KpiEngine::new().compute(&demo()).unwrap();
    let e = &output.report.economics;

    assert_eq!(e.avg_referral_fee_per_case, dec!(2997));
    assert_eq!(e.gross_revenue, dec!(14985));
    assert_eq!(e.variable_cost_total, dec!(1500));
    assert_eq!(e.total_costs, dec!(12000));
    assert_eq!(e.net_profit, dec!(2985));
    assert_eq!(e.roi.round_dp(3), dec!(0.249));
    assert_eq!(e.breakeven_keepers, Some(dec!(5)));
}

#[test]
fn zero_costs_with_keepers() {
    let output = KpiEngine::new().compute(&zero_cost()).unwrap();
    let e = &output.report.economics;
    assert_eq!(e.roi, Decimal::ZERO);
    assert_eq!(e.cpk, Some(Decimal::ZERO));
}

#[test]
fn zero_costs_without_keepers() {
    let raw = RawInputs {
        keepers_count: Some(dec!(0).into()),
        ..zero_cost()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    let e = &output.report.economics;
    assert_eq!(e.roi, Decimal::ZERO);
    assert!(e.cpk_is_unbounded());
    assert!(output.report_text().contains("CPK (Total Costs ÷ Keepers): ∞"));
}

#[test]
fn cases_not_yet_matured() {
    let raw = RawInputs {
        months_in_operation: Some(dec!(3).into()),
        avg_case_duration_months: Some(dec!(12).into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    let t = &output.report.time_based;
    assert_eq!(t.monthly_referral_income, Decimal::ZERO);
    assert_eq!(t.cash_flow_coverage_ratio, Decimal::ZERO);
}

#[test]
fn all_tiers_zero() {
    let raw = RawInputs {
        tier_1_pct: Some(dec!(0).into()),
        tier_2_pct: Some(dec!(0).into()),
        tier_3_pct: Some(dec!(0).into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    assert_eq!(output.report.time_based.case_maturity_distribution, "0% / 0% / 0%");
}

#[test]
fn undefined_breakeven_renders_a_dash() {
    let raw = RawInputs {
        avg_settlement: Some(dec!(0).into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    assert_eq!(output.report.economics.breakeven_keepers, None);
    assert_eq!(output.markers.breakeven_keepers, None);
    assert!(output.report_text().contains("Breakeven Keepers (Net=0): —"));
}

#[test]
fn keepers_from_rate() {
    let raw = RawInputs {
        keepers_mode: Some("From rate (%)".to_string()),
        keepers_count: None,
        lead_to_keeper_rate_pct: Some(dec!(12.5).into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    // 12.5% of 60 = 7.5 -> 8
    assert_eq!(output.report.economics.keepers, 8);
    assert_eq!(
        output.report.params.keeper_source,
        KeeperSource::FromRate { rate_pct: dec!(12.5) }
    );
}

#[test]
fn missing_required_field_produces_no_output() {
    let raw = RawInputs {
        qualified_leads: None,
        ..demo()
    };
    let err = KpiEngine::new().compute(&raw).unwrap_err();
    assert_eq!(err, ValidationError::MissingField("qualified_leads"));
    assert!(err.to_string().starts_with("Please fill in all required fields"));
}

#[test]
fn out_of_range_inputs_are_clamped_not_rejected() {
    let raw = RawInputs {
        ad_spend: Some("1000000".into()),
        desired_roi_pct: Some(dec!(-50).into()),
        x_axis_max: Some(dec!(5000).into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    assert_eq!(output.report.params.ad_spend, dec!(100000));
    assert_eq!(output.report.params.desired_roi_pct, Decimal::ZERO);
    assert_eq!(output.markers.xmax, 1000);
    assert_eq!(output.net_profit.len(), 1001);
}

#[test]
fn series_cover_the_auto_scaled_axis() {
    let output = KpiEngine::new().compute(&demo()).unwrap();
    assert_eq!(output.markers.xmax, 90);
    assert_eq!(output.net_profit.len(), 91);
    assert_eq!(output.roi.len(), 91);
    assert_eq!(output.markers.breakeven_keepers, Some(5));
    assert_eq!(output.markers.target_roi, Decimal::ONE);
}

#[test]
fn computation_is_repeatable() {
    let engine = KpiEngine::new();
    assert_eq!(engine.compute(&demo()).unwrap(), engine.compute(&demo()).unwrap());
}

#[test]
fn typed_params_give_the_same_result() {
    let engine = KpiEngine::new();
    let from_raw = engine.compute(&demo()).unwrap();
    let from_params = engine.compute_params(&from_raw.report.params);
    assert_eq!(from_raw, from_params);
}

#[test]
fn report_serializes_to_json() {
    let output = KpiEngine::new().compute(&demo()).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["report"]["economics"]["keepers"], 5);
    let cpk: Decimal = json["report"]["economics"]["cpk"].as_str().unwrap().parse().unwrap();
    assert_eq!(cpk, dec!(2400));
    assert!(json["net_profit"]["points"].is_array());
}

#[test]
fn oversized_numbers_are_clamped_not_rejected() {
    let raw = RawInputs {
        ad_spend: Some("1e40".into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    assert_eq!(output.report.params.ad_spend, dec!(100000));

    let raw: RawInputs = serde_json::from_str(
        r#"{ "ad_spend": 1e40, "qualified_leads": 60, "keepers_count": 5 }"#,
    )
    .unwrap();
    let output = KpiEngine::new().compute(&raw).unwrap();
    assert_eq!(output.report.params.ad_spend, dec!(100000));
}

#[test]
fn tiny_fee_reports_a_breakeven_count() {
    let raw = RawInputs {
        avg_settlement: Some("0.00000000000000001".into()),
        ..demo()
    };
    let output = KpiEngine::new().compute(&raw).unwrap();
    let breakeven = output.report.economics.breakeven_keepers.unwrap();
    assert!(breakeven > Decimal::from(u64::MAX));
    assert_eq!(output.markers.breakeven_keepers, None);
    assert!(!output.report_text().contains("Breakeven Keepers (Net=0): —"));
}
