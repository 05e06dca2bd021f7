//! Regions grouped by backing binary.

#![allow(clippy::format_push_string)]

use crate::analysis::Report;
use crate::render::{banner, format_bytes};

const WIDTH: usize = 90;

#[must_use]
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("MEMORY MAP - GROUPED BY BINARY", WIDTH));
    out.push('\n');

    for group in report.groups() {
        out.push_str(&format!("📦 {}\n", group.name));
        out.push_str(&format!(
            "   Total size: {} bytes ({} regions)\n",
            format_bytes(group.total_bytes),
            group.region_indices.len()
        ));

        for &index in &group.region_indices {
            let region = &report.address_space().regions()[index];
            out.push_str(&format!(
                "   0x{:08x}-0x{:08x}  {:<5}  {:<8}  {:>10} bytes\n",
                region.start(),
                region.end(),
                region.permissions().to_string(),
                region.class().name(),
                region.size()
            ));
        }
        out.push('\n');
    }
    out
}
