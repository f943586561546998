//! Renderer-neutral chart descriptions for the KPI series.
//!
//! Nothing here draws pixels. [`build_charts`] turns a `KpiOutput` into two
//! [`ChartSpec`]s carrying lines, markers, annotations and axis limits, which a
//! front end can render as it likes. They are exported as JSON, and the same
//! series can be printed as a table in the terminal.

pub mod axis;
pub mod chart;
pub mod error;
pub mod table;

pub use axis::{AxisRange, TickFormat};
pub use chart::{build_charts, net_profit_chart, roi_chart, ChartPair, ChartSpec};
pub use error::ChartError;
pub use table::series_table;

use std::fs;
use std::path::Path;

/// Serializes the chart pair as pretty-printed JSON.
pub fn to_json(charts: &ChartPair) -> Result<String, ChartError> {
    Ok(serde_json::to_string_pretty(charts)?)
}

/// Writes the chart pair to `path` as JSON.
pub fn write_json(charts: &ChartPair, path: &Path) -> Result<(), ChartError> {
    fs::write(path, to_json(charts)?)?;
    tracing::info!(path = %path.display(), "Chart specs written");
    Ok(())
}
