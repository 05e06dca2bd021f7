//! Crash-context analysis printout: one block per provided register,
//! plus the backtrace when raw return addresses were supplied.

#![allow(clippy::format_push_string)]

use crate::analysis::{Report, ResolutionOutcome};
use crate::render::banner;

const WIDTH: usize = 90;

#[must_use]
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("CRASH CONTEXT ANALYSIS", WIDTH));
    out.push('\n');

    if let Some(resolutions) = report.crash_resolutions() {
        for res in resolutions {
            out.push_str(&format!("{}:\n", res.register_role.long_name()));
            out.push_str(&format!("  Address: 0x{:016x}\n", res.address));

            match &res.outcome {
                ResolutionOutcome::Resolved {
                    region_index,
                    offset_in_region,
                    containing_binary,
                    symbolization_command,
                } => {
                    let region = &report.address_space().regions()[*region_index];
                    out.push_str(&format!(
                        "  Region: {} [{}]\n",
                        containing_binary,
                        region.class().name()
                    ));
                    out.push_str(&format!("  Permissions: {}\n", region.permissions()));
                    out.push_str(&format!("  Offset in region: 0x{offset_in_region:x}\n"));
                    if let Some(command) = symbolization_command {
                        out.push_str(&format!("  Debug command: {command}\n"));
                    }
                    for diagnostic in &res.diagnostics {
                        out.push_str(&format!("  ⚠️  WARNING: {}\n", diagnostic.message()));
                    }
                }
                ResolutionOutcome::Unmapped => {
                    out.push_str("  ⚠️  ERROR: Address not found in any mapped region!\n");
                }
            }
            out.push('\n');
        }
    }

    if let Some(frames) = report.backtrace() {
        out.push_str("Backtrace Analysis:\n\n");
        for (i, frame) in frames.iter().enumerate() {
            match &frame.outcome {
                ResolutionOutcome::Resolved {
                    region_index,
                    offset_in_region,
                    containing_binary,
                    ..
                } => {
                    let region = &report.address_space().regions()[*region_index];
                    out.push_str(&format!(
                        "  #{i}: 0x{:016x} → {} + 0x{:x} [{}]\n",
                        frame.address,
                        containing_binary,
                        offset_in_region,
                        region.class().name()
                    ));
                }
                ResolutionOutcome::Unmapped => {
                    out.push_str(&format!("  #{i}: 0x{:016x} → NOT MAPPED\n", frame.address));
                }
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    const MAPS: &str = "\
0214f000-0218a000 rw-p 00000000 00:00 0 [heap]\n\
f79e0000-f79e6000 r-xp 00000000 b3:04 4096 /lib/libubus.so.20230605\n\
ff8a0000-ff8c1000 rw-p 00000000 00:00 0 [stack]";

    #[test]
    fn test_register_blocks() {
        let ctx = CrashContext {
            pc: Some(0xf79e_245c),
            sp: Some(0x0216_0000),
            ..CrashContext::default()
        };
        let report = Report::assemble(parse_str(MAPS).unwrap(), None, &ctx, &[]);
        let text = render(&report);

        assert!(text.contains("Program Counter (PC):"));
        assert!(text.contains("Address: 0x00000000f79e245c"));
        assert!(text.contains("Debug command: addr2line -e /lib/libubus.so.20230605 0x245c"));
        assert!(text.contains("Stack Pointer (SP):"));
        assert!(text.contains("WARNING: pointer is not in a stack region"));
    }

    #[test]
    fn test_unmapped_register() {
        let ctx = CrashContext { pc: Some(0xdead_0000), ..CrashContext::default() };
        let report = Report::assemble(parse_str(MAPS).unwrap(), None, &ctx, &[]);
        assert!(render(&report).contains("ERROR: Address not found in any mapped region!"));
    }

    #[test]
    fn test_backtrace_section() {
        let ctx = CrashContext { pc: Some(0xf79e_245c), ..CrashContext::default() };
        let report =
            Report::assemble(parse_str(MAPS).unwrap(), None, &ctx, &[0xf79e_1000, 0x1]);
        let text = render(&report);

        assert!(text.contains("Backtrace Analysis:"));
        assert!(text.contains("#0: 0x00000000f79e1000 → /lib/libubus.so.20230605 + 0x1000 [CODE]"));
        assert!(text.contains("#1: 0x0000000000000001 → NOT MAPPED"));
    }
}
