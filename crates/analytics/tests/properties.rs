use analytics::economics;
use analytics::inputs::{self, clamp};
use analytics::time_based::normalize_tiers;
use analytics::KpiEngine;
use core_types::{KeeperSource, RawInputs, TierMix};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A decimal with two fractional digits in `[lo, hi]`.
fn money(lo: i64, hi: i64) -> impl Strategy<Value = Decimal> {
    (lo * 100..=hi * 100).prop_map(|cents| Decimal::new(cents, 2))
}

fn scenario() -> impl Strategy<Value = RawInputs> {
    (
        money(-1000, 120_000),
        0i64..1200,
        0i64..600,
        money(0, 1_000_000),
        money(0, 100),
        money(0, 100),
        money(0, 1000),
        money(0, 50_000),
        0i64..130,
    )
        .prop_map(
            |(ad, leads, keepers, settlement, contingency, referral, vcpl, overhead, months)| {
                RawInputs {
                    ad_spend: Some(ad.into()),
                    qualified_leads: Some(leads.into()),
                    keepers_count: Some(keepers.into()),
                    avg_settlement: Some(settlement.into()),
                    contingency_pct: Some(contingency.into()),
                    referral_fee_pct: Some(referral.into()),
                    variable_cost_per_lead: Some(vcpl.into()),
                    fixed_overhead: Some(overhead.into()),
                    months_in_operation: Some(months.into()),
                    ..RawInputs::demo()
                }
            },
        )
}

proptest! {
    #[test]
    fn clamping_is_idempotent(v in money(-1_000_000, 1_000_000), lo in money(-100, 0), hi in money(0, 100)) {
        let once = clamp(v, lo, hi);
        prop_assert_eq!(clamp(once, lo, hi), once);
        prop_assert!(once >= lo && once <= hi);
        if v >= lo && v <= hi {
            prop_assert_eq!(once, v);
        }
    }

    #[test]
    fn clamping_is_monotonic(a in money(-200_000, 200_000), b in money(-200_000, 200_000)) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(inputs::AD_SPEND.clamp(lo) <= inputs::AD_SPEND.clamp(hi));
    }

    #[test]
    fn total_costs_identity(raw in scenario()) {
        let output = KpiEngine::new().compute(&raw).unwrap();
        let p = &output.report.params;
        let e = &output.report.economics;
        prop_assert_eq!(
            e.total_costs,
            p.ad_spend + Decimal::from(p.qualified_leads) * p.variable_cost_per_lead + p.fixed_overhead
        );
    }

    #[test]
    fn roi_and_cpk_sentinels(raw in scenario()) {
        let e = KpiEngine::new().compute(&raw).unwrap().report.economics;
        if e.total_costs > Decimal::ZERO {
            prop_assert_eq!(e.roi, e.net_profit / e.total_costs);
        } else {
            prop_assert_eq!(e.roi, Decimal::ZERO);
        }
        prop_assert_eq!(e.cpk_is_unbounded(), e.keepers == 0);
    }

    #[test]
    fn breakeven_is_minimal(costs in money(0, 1_150_000), fee in money(0, 100_000)) {
        match economics::breakeven_keepers(costs, fee) {
            None => prop_assert!(fee.is_zero()),
            Some(k) => {
                prop_assert!(k * fee - costs >= Decimal::ZERO);
                if k > Decimal::ZERO {
                    prop_assert!((k - Decimal::ONE) * fee - costs < Decimal::ZERO);
                }
            }
        }
    }

    #[test]
    fn tiers_sum_to_one_hundred(t1 in money(0, 100), t2 in money(0, 100), t3 in money(0, 100)) {
        let mix = TierMix { tier_1_pct: t1, tier_2_pct: t2, tier_3_pct: t3 };
        let normalized = normalize_tiers(mix);
        if mix.total() > Decimal::ZERO {
            prop_assert!((normalized.total() - dec!(100)).abs() <= dec!(0.01));
        } else {
            prop_assert_eq!(normalized, mix);
        }
    }

    #[test]
    fn series_span_zero_to_xmax(raw in scenario()) {
        let output = KpiEngine::new().compute(&raw).unwrap();
        let xmax = output.markers.xmax;
        prop_assert_eq!(output.net_profit.len(), xmax as usize + 1);
        prop_assert_eq!(output.net_profit.points.last().map(|p| p.x), Some(xmax));
        if let Some(b) = output.markers.breakeven_keepers {
            prop_assert!(b <= u64::from(xmax));
        }
    }

    #[test]
    fn direct_entry_keepers_are_in_range(keepers in -50i64..800) {
        let raw = RawInputs { keepers_count: Some(keepers.into()), ..RawInputs::demo() };
        let params = inputs::normalize(&raw).unwrap();
        match params.keeper_source {
            KeeperSource::DirectEntry { count } => prop_assert!(count <= 500),
            other => prop_assert!(false, "unexpected keeper source {:?}", other),
        }
    }
}
