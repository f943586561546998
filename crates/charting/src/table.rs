use analytics::KpiOutput;
use analytics::format::{cash, grouped};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Samples both series every `step` keepers for terminal output.
///
/// The current keeper count and the breakeven point are always included and
/// flagged in the last column, even when they fall between samples.
pub fn series_table(output: &KpiOutput, step: u32) -> Table {
    let step = step.max(1) as usize;
    let m = &output.markers;
    let breakeven = m.breakeven_keepers.and_then(|b| u32::try_from(b).ok());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Keepers", "Net Profit", "ROI", "Marker"]);

    for (i, (net, roi)) in output.net_profit.iter().zip(output.roi.iter()).enumerate() {
        let is_current = net.x == m.current_keepers;
        let is_breakeven = breakeven == Some(net.x);
        if i % step != 0 && !is_current && !is_breakeven {
            continue;
        }

        let marker = match (is_current, is_breakeven) {
            (true, true) => "current, breakeven",
            (true, false) => "current",
            (false, true) => "breakeven",
            (false, false) => "",
        };
        table.add_row(vec![
            Cell::new(net.x),
            Cell::new(cash(net.y)),
            Cell::new(format!("{}%", grouped(roi.y * Decimal::ONE_HUNDRED, 1))),
            Cell::new(marker),
        ]);
    }

    for index in 0..3 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}
