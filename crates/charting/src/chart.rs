use crate::axis::{self, AxisRange, TickFormat};
use analytics::format::{fixed, grouped};
use analytics::{KpiOutput, Series};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

const NET_PROFIT_COLOR: &str = "#2E86AB";
const ROI_COLOR: &str = "#A23B72";
const TARGET_COLOR: &str = "#F18F01";
const CURRENT_COLOR: &str = "green";
const BREAKEVEN_COLOR: &str = "orange";
const ZERO_LINE_COLOR: &str = "black";

const X_LABEL: &str = "Keepers (signed cases)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub orientation: Orientation,
    pub value: f64,
    pub style: LineStyle,
    pub color: String,
    /// Legend entry, if any.
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub at: Point,
    pub shape: MarkerShape,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    Left,
    Right,
}

/// A text box anchored to a data point and shifted by an offset in screen points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub anchor: Point,
    pub offset_x: i32,
    pub offset_y: i32,
    pub align: HorizontalAlign,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillKind {
    Profit,
    Loss,
}

/// A contiguous run of x-values shaded between the line and zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRegion {
    pub kind: FillKind,
    pub from_x: f64,
    pub to_x: f64,
}

/// A renderer-neutral description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub line: LineSeries,
    pub reference_lines: Vec<ReferenceLine>,
    pub markers: Vec<Marker>,
    pub annotations: Vec<Annotation>,
    pub fills: Vec<FillRegion>,
    pub x_limits: AxisRange,
    pub y_limits: AxisRange,
    pub y_ticks: TickFormat,
}

/// The two charts produced for every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPair {
    pub net_profit: ChartSpec,
    pub roi: ChartSpec,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn points(series: &Series, scale: f64) -> Vec<Point> {
    series
        .iter()
        .map(|p| Point {
            x: f64::from(p.x),
            y: to_f64(p.y) * scale,
        })
        .collect()
}

/// Labels on the left of points in the leftmost `fraction` of the axis,
/// on the right beyond it, so they stay inside the plot.
fn placement(x: f64, xmax: u32, fraction: f64) -> (i32, HorizontalAlign) {
    if x < f64::from(xmax) * fraction {
        (10, HorizontalAlign::Left)
    } else {
        (-10, HorizontalAlign::Right)
    }
}

fn zero_line() -> ReferenceLine {
    ReferenceLine {
        orientation: Orientation::Horizontal,
        value: 0.0,
        style: LineStyle::Solid,
        color: ZERO_LINE_COLOR.to_string(),
        label: None,
    }
}

fn current_line(keepers: f64) -> ReferenceLine {
    ReferenceLine {
        orientation: Orientation::Vertical,
        value: keepers,
        style: LineStyle::Solid,
        color: CURRENT_COLOR.to_string(),
        label: Some("Current".to_string()),
    }
}

/// Splits the line into runs that are entirely profitable or entirely loss-making.
fn fill_regions(points: &[Point]) -> Vec<FillRegion> {
    let mut regions: Vec<FillRegion> = Vec::new();
    for p in points {
        let kind = if p.y >= 0.0 { FillKind::Profit } else { FillKind::Loss };
        match regions.last_mut() {
            Some(region) if region.kind == kind => region.to_x = p.x,
            _ => regions.push(FillRegion {
                kind,
                from_x: p.x,
                to_x: p.x,
            }),
        }
    }
    regions
}

/// Net profit against keeper count, with the current and breakeven points.
pub fn net_profit_chart(output: &KpiOutput) -> ChartSpec {
    let m = &output.markers;
    let keepers = f64::from(m.current_keepers);
    let current_net = to_f64(m.current_net_profit);
    let line = points(&output.net_profit, 1.0);

    let mut reference_lines = vec![zero_line(), current_line(keepers)];
    let mut markers = vec![Marker {
        at: Point { x: keepers, y: current_net },
        shape: MarkerShape::Circle,
        color: CURRENT_COLOR.to_string(),
    }];
    let mut annotations = Vec::new();

    if let Some(breakeven) = m.breakeven_keepers {
        let x = breakeven as f64;
        reference_lines.push(ReferenceLine {
            orientation: Orientation::Vertical,
            value: x,
            style: LineStyle::Dashed,
            color: BREAKEVEN_COLOR.to_string(),
            label: Some("Breakeven".to_string()),
        });
        markers.push(Marker {
            at: Point { x, y: 0.0 },
            shape: MarkerShape::Square,
            color: BREAKEVEN_COLOR.to_string(),
        });
        let (offset_x, align) = placement(x, m.xmax, 0.9);
        annotations.push(Annotation {
            text: format!("Breakeven: {breakeven}"),
            anchor: Point { x, y: 0.0 },
            offset_x,
            offset_y: 15,
            align,
            color: BREAKEVEN_COLOR.to_string(),
        });
    }

    let (offset_x, align) = placement(keepers, m.xmax, 0.85);
    annotations.push(Annotation {
        text: format!(
            "K={}\nNet=${}",
            m.current_keepers,
            grouped(m.current_net_profit, 0)
        ),
        anchor: Point { x: keepers, y: current_net },
        offset_x,
        offset_y: if current_net >= 0.0 { 20 } else { -30 },
        align,
        color: CURRENT_COLOR.to_string(),
    });

    let plotted_current = output
        .net_profit
        .value_at(m.current_keepers)
        .map(to_f64)
        .unwrap_or(0.0);
    let ys: Vec<f64> = line.iter().map(|p| p.y).collect();

    ChartSpec {
        title: "Net Profit vs Keepers".to_string(),
        x_label: X_LABEL.to_string(),
        y_label: "Net Profit ($)".to_string(),
        fills: fill_regions(&line),
        y_limits: axis::net_profit_y_limits(&ys, plotted_current),
        x_limits: axis::x_limits(m.xmax),
        line: LineSeries {
            label: "Net Profit".to_string(),
            color: NET_PROFIT_COLOR.to_string(),
            points: line,
        },
        reference_lines,
        markers,
        annotations,
        y_ticks: TickFormat::Dollars,
    }
}

/// ROI (in percent) against keeper count, with the target ROI line.
pub fn roi_chart(output: &KpiOutput) -> ChartSpec {
    let m = &output.markers;
    let keepers = f64::from(m.current_keepers);
    let target_pct = to_f64(m.target_roi) * 100.0;
    let current_roi_pct = to_f64(m.current_roi) * 100.0;
    let line = points(&output.roi, 100.0);
    let (offset_x, align) = placement(keepers, m.xmax, 0.85);

    let ys: Vec<f64> = line.iter().map(|p| p.y).collect();

    ChartSpec {
        title: "ROI vs Keepers".to_string(),
        x_label: X_LABEL.to_string(),
        y_label: "ROI (%)".to_string(),
        y_limits: axis::roi_y_limits(&ys, current_roi_pct, target_pct),
        x_limits: axis::x_limits(m.xmax),
        line: LineSeries {
            label: "ROI".to_string(),
            color: ROI_COLOR.to_string(),
            points: line,
        },
        reference_lines: vec![
            zero_line(),
            ReferenceLine {
                orientation: Orientation::Horizontal,
                value: target_pct,
                style: LineStyle::Dashed,
                color: TARGET_COLOR.to_string(),
                label: Some("Target ROI".to_string()),
            },
            current_line(keepers),
        ],
        markers: vec![Marker {
            at: Point { x: keepers, y: current_roi_pct },
            shape: MarkerShape::Circle,
            color: CURRENT_COLOR.to_string(),
        }],
        annotations: vec![
            Annotation {
                text: format!("Target: {}%", fixed(m.target_roi * Decimal::ONE_HUNDRED, 0)),
                anchor: Point {
                    x: f64::from(m.xmax) * 0.02,
                    y: target_pct,
                },
                offset_x: 0,
                offset_y: 8,
                align: HorizontalAlign::Left,
                color: TARGET_COLOR.to_string(),
            },
            Annotation {
                text: format!(
                    "K={}\nROI={}%",
                    m.current_keepers,
                    fixed(m.current_roi * Decimal::ONE_HUNDRED, 1)
                ),
                anchor: Point { x: keepers, y: current_roi_pct },
                offset_x,
                offset_y: 20,
                align,
                color: CURRENT_COLOR.to_string(),
            },
        ],
        fills: Vec::new(),
        y_ticks: TickFormat::Percent,
    }
}

/// Builds both charts for one engine run.
pub fn build_charts(output: &KpiOutput) -> ChartPair {
    let charts = ChartPair {
        net_profit: net_profit_chart(output),
        roi: roi_chart(output),
    };
    tracing::debug!(
        xmax = output.markers.xmax,
        breakeven_marked = output.markers.breakeven_keepers.is_some(),
        "Chart specs built"
    );
    charts
}
