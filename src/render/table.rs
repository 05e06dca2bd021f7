//! Tabular region view.

// String formatting intentionally uses format! for clarity
#![allow(clippy::format_push_string)]

use crate::analysis::Report;
use crate::render::{banner, format_bytes};

const WIDTH: usize = 130;

#[must_use]
pub fn render(report: &Report) -> String {
    let meta = report.metadata();
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("MEMORY MAP - TABULAR VIEW", WIDTH));
    out.push_str(&format!(
        "Process: {:<20} PID: {:<10} Regions: {:<5} Total Size: {} bytes\n",
        meta.process_name,
        meta.pid.map_or_else(|| "-".to_string(), |p| p.to_string()),
        meta.region_count,
        format_bytes(meta.total_size)
    ));
    out.push_str(&"=".repeat(WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{:<14} {:<14} {:<12} {:<6} {:<10} {:<60}\n",
        "Start Addr", "End Addr", "Size", "Perms", "Type", "Binary/Mapping"
    ));
    out.push_str(&"-".repeat(WIDTH));
    out.push('\n');

    for region in report.address_space().regions() {
        out.push_str(&format!(
            "0x{:08x}     0x{:08x}     {:>10}  {:<6} {:<10} {}\n",
            region.start(),
            region.end(),
            region.size(),
            region.permissions().to_string(),
            region.class().name(),
            region.pathname().label()
        ));
    }

    out.push_str(&"=".repeat(WIDTH));
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    #[test]
    fn test_table_lists_every_region() {
        let space = parse_str(
            "0098b000-0098c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt\n\
             0214f000-0218a000 rw-p 00000000 00:00 0 [heap]",
        )
        .unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        let text = render(&report);

        assert!(text.contains("MEMORY MAP - TABULAR VIEW"));
        assert!(text.contains("Process: amxrt"));
        assert!(text.contains("0x0098b000"));
        assert!(text.contains("/usr/bin/amxrt"));
        assert!(text.contains("HEAP"));
        assert!(text.contains("[heap]"));
    }
}
