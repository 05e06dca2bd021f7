//! Per-class statistics table.

#![allow(clippy::format_push_string)]

use crate::analysis::Report;
use crate::render::{banner, format_bytes};

const WIDTH: usize = 90;
const TABLE_WIDTH: usize = 70;

#[must_use]
pub fn render(report: &Report) -> String {
    let stats = report.statistics();
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("MEMORY STATISTICS", WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<15} {:<8} {:<20} {}\n",
        "Segment Type", "Count", "Total Size", "Percentage"
    ));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');

    for class in stats.classes() {
        out.push_str(&format!(
            "{:<15} {:<8} {:>15} bytes  {:>6.2}%\n",
            class.class.name(),
            class.count,
            format_bytes(class.total_bytes),
            class.percentage
        ));
    }

    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<15} {:<8} {:>15} bytes  100.00%\n\n",
        "TOTAL",
        stats.region_count(),
        format_bytes(stats.total_bytes())
    ));
    out
}
