//! Axis ranges and tick labels.

use serde::{Deserialize, Serialize};

/// Net profit around zero is widened to at least this range so a near-breakeven
/// scenario still shows some context.
const NET_CONTEXT_MIN: f64 = -5_000.0;
const NET_CONTEXT_MAX: f64 = 10_000.0;
const NET_MIN_PAD: f64 = 1_000.0;
const ROI_MIN_PAD: f64 = 10.0;
const PAD_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// How y-axis tick values are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    /// `$12K` from a thousand up, `$950` below.
    Dollars,
    /// `45%`
    Percent,
}

impl TickFormat {
    pub fn label(&self, value: f64) -> String {
        match self {
            TickFormat::Dollars if value.abs() >= 1_000.0 => format!("${:.0}K", value / 1_000.0),
            TickFormat::Dollars => format!("${value:.0}"),
            TickFormat::Percent => format!("{value:.0}%"),
        }
    }
}

/// A small margin either side of `0..=xmax`.
pub fn x_limits(xmax: u32) -> AxisRange {
    let xmax = f64::from(xmax);
    AxisRange {
        min: -xmax * 0.02,
        max: xmax * 1.02,
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

fn pad(min: f64, max: f64, min_pad: f64) -> AxisRange {
    let range = max - min;
    let padding = if range != 0.0 {
        (range.abs() * PAD_FRACTION).max(min_pad)
    } else {
        min_pad
    };
    AxisRange {
        min: min - padding,
        max: max + padding,
    }
}

/// Y-range of the net profit chart. Always includes zero.
///
/// `current_net` is the plotted value at the current keeper count (0 when the
/// current point lies beyond the axis).
pub fn net_profit_y_limits(nets: &[f64], current_net: f64) -> AxisRange {
    let (mut min, mut max) = min_max(nets);
    if current_net.abs() < 1_000.0 {
        max = max.max(NET_CONTEXT_MAX);
        min = min.min(NET_CONTEXT_MIN);
    }
    pad(min, max, NET_MIN_PAD)
}

/// Y-range of the ROI chart, in percent. Always includes zero and the target.
pub fn roi_y_limits(rois_pct: &[f64], current_roi_pct: f64, target_pct: f64) -> AxisRange {
    let (min, max) = min_max(rois_pct);
    let mut max = max.max(target_pct);
    if current_roi_pct < 50.0 {
        max = max.max(100.0);
        if target_pct > 100.0 {
            max = target_pct * 1.2;
        }
    }
    pad(min, max, ROI_MIN_PAD)
}
