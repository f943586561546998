//! Net profit and ROI as functions of keeper volume, for charting.

use crate::economics::{pct, ratio_or_zero, CoreEconomics};
use core_types::BusinessParams;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Smallest x-axis bound chosen by auto-scaling.
pub const MIN_AUTO_XMAX: u32 = 20;
/// Largest x-axis bound, manual or automatic. Keeps a series at most 1001 points.
pub const MAX_XMAX: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: u32,
    pub y: Decimal,
}

/// A y-value for every keeper count from 0 to `xmax` inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    /// The y-value at keeper count `x`, if the series reaches that far.
    pub fn value_at(&self, x: u32) -> Option<Decimal> {
        self.points.get(x as usize).map(|p| p.y)
    }

    pub fn min_y(&self) -> Option<Decimal> {
        self.points.iter().map(|p| p.y).min()
    }
}

/// Reference points a renderer annotates on both charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMarkers {
    /// Suggested upper bound of the x-axis.
    pub xmax: u32,
    /// The current keeper count.
    pub current_keepers: u32,
    pub current_net_profit: Decimal,
    /// ROI at the current keeper count, as a fraction.
    pub current_roi: Decimal,
    /// Present only when breakeven is defined and falls within `xmax`.
    pub breakeven_keepers: Option<u64>,
    /// The horizontal target line on the ROI chart, as a fraction.
    pub target_roi: Decimal,
}

/// Everything the charting side needs from one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBundle {
    pub net_profit: Series,
    pub roi: Series,
    pub markers: ChartMarkers,
}

pub fn net_profit_at(keepers: u32, economics: &CoreEconomics) -> Decimal {
    Decimal::from(keepers) * economics.avg_referral_fee_per_case - economics.total_costs
}

pub fn roi_at(keepers: u32, economics: &CoreEconomics) -> Decimal {
    ratio_or_zero(net_profit_at(keepers, economics), economics.total_costs)
}

/// Picks the x-axis bound.
///
/// A manual `x_axis_max` wins. Otherwise the bound is 1.5 times the largest of
/// the current keepers, the breakeven count, the lead count and 5, but never
/// below [`MIN_AUTO_XMAX`] or above [`MAX_XMAX`].
pub fn resolve_xmax(params: &BusinessParams, economics: &CoreEconomics) -> u32 {
    if params.x_axis_max > 0 {
        return params.x_axis_max.min(MAX_XMAX);
    }

    let max_relevant = [
        Decimal::from(economics.keepers),
        economics.breakeven_keepers.unwrap_or(Decimal::ZERO),
        Decimal::from(economics.qualified_leads),
        dec!(5),
    ]
    .into_iter()
    .max()
    .unwrap_or(dec!(5));

    let scaled = max_relevant
        .checked_mul(dec!(1.5))
        .and_then(|v| v.round().to_u32())
        .unwrap_or(MAX_XMAX);
    scaled.clamp(MIN_AUTO_XMAX, MAX_XMAX)
}

/// Generates both series and their reference markers.
pub fn generate(params: &BusinessParams, economics: &CoreEconomics) -> SeriesBundle {
    let xmax = resolve_xmax(params, economics);

    let (net_points, roi_points): (Vec<_>, Vec<_>) = (0..=xmax)
        .map(|k| {
            let net = net_profit_at(k, economics);
            let roi = ratio_or_zero(net, economics.total_costs);
            (SeriesPoint { x: k, y: net }, SeriesPoint { x: k, y: roi })
        })
        .unzip();

    let markers = ChartMarkers {
        xmax,
        current_keepers: economics.keepers,
        current_net_profit: net_profit_at(economics.keepers, economics),
        current_roi: roi_at(economics.keepers, economics),
        breakeven_keepers: economics
            .breakeven_keepers
            .filter(|&b| b <= Decimal::from(xmax))
            .and_then(|b| b.to_u64()),
        target_roi: pct(params.desired_roi_pct),
    };

    SeriesBundle {
        net_profit: Series { points: net_points },
        roi: Series { points: roi_points },
        markers,
    }
}
