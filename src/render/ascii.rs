//! Address-ordered ASCII diagram of the layout, high memory first,
//! with crash-register markers pointing at the regions they landed in.

#![allow(clippy::format_push_string)]

use crate::analysis::{Report, ResolutionOutcome};
use crate::render::{banner, format_bytes};

const WIDTH: usize = 90;

#[must_use]
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("MEMORY LAYOUT - ASCII VISUALIZATION", WIDTH));
    out.push('\n');
    out.push_str("High Memory\n");
    out.push_str("     ↑\n");
    out.push_str("     │\n");

    for (index, region) in report.address_space().regions().iter().enumerate().rev() {
        let markers = markers_for(report, index);
        let marker_str =
            if markers.is_empty() { String::new() } else { format!(" ← {}", markers.join(" ")) };

        out.push_str(&format!(
            "0x{:08x} ──┬─ {:<5} {:<8} {}{}\n",
            region.end(),
            region.permissions().to_string(),
            region.class().name(),
            region.pathname().label(),
            marker_str
        ));
        out.push_str("             │\n");
        out.push_str(&format!(
            "0x{:08x} ──┴─ (size: {} bytes)\n",
            region.start(),
            format_bytes(region.size())
        ));
        out.push_str("     │\n");
    }

    out.push_str("     ↓\n");
    out.push_str("Low Memory\n\n");
    out
}

/// Register short names whose resolution landed in region `index`.
fn markers_for(report: &Report, index: usize) -> Vec<&'static str> {
    let Some(resolutions) = report.crash_resolutions() else {
        return Vec::new();
    };
    resolutions
        .iter()
        .filter(|res| {
            matches!(res.outcome, ResolutionOutcome::Resolved { region_index, .. }
                if region_index == index)
        })
        .map(|res| res.register_role.short_name())
        .collect()
}
