//! Boxed high-level segment overview: stack, shared libraries, heap,
//! data, and code of the main binary at a glance.

#![allow(clippy::format_push_string)]

use crate::analysis::Report;
use crate::classification::SegmentClass;
use crate::region::Region;

#[must_use]
pub fn render(report: &Report) -> String {
    let regions = report.address_space().regions();
    let main_path = main_binary_path(report);

    let is_shared_lib = |region: &Region| -> bool {
        let Some(path) = region.pathname().as_path() else {
            return false;
        };
        if Some(path) == main_path {
            return false;
        }
        path.contains(".so") || path.contains("/lib/") || path.contains("/usr/lib/")
    };

    let sections: Vec<(&str, Vec<&Region>)> = vec![
        ("Stack", regions.iter().filter(|r| r.class() == SegmentClass::Stack).collect()),
        ("Shared Libs", regions.iter().filter(|r| is_shared_lib(r)).collect()),
        ("Heap", regions.iter().filter(|r| r.class() == SegmentClass::Heap).collect()),
        (
            "Data / Anon",
            regions
                .iter()
                .filter(|r| {
                    matches!(
                        r.class(),
                        SegmentClass::Data | SegmentClass::Anon | SegmentClass::Rodata
                    ) && !is_shared_lib(r)
                })
                .collect(),
        ),
        (
            "Code (.text)",
            regions
                .iter()
                .filter(|r| r.class() == SegmentClass::Code && !is_shared_lib(r))
                .collect(),
        ),
    ];

    let fmt_region = |region: &Region| -> String {
        format!(
            "0x{:08x}-0x{:08x}  {:<4} {:<6} {}",
            region.start(),
            region.end(),
            region.permissions().to_string(),
            region.class().name(),
            region.pathname().label()
        )
    };

    // Box width fits the longest content line
    let mut width = "SEGMENT OVERVIEW".len();
    for (title, regions) in &sections {
        width = width.max(title.len());
        for region in regions {
            width = width.max(fmt_region(region).chars().count());
        }
        width = width.max("(n/a)".len());
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{:^w$}\n", "SEGMENT OVERVIEW", w = width + 4));

    let box_line = |text: &str| -> String { format!("│ {text:<width$} │\n") };

    out.push_str(&format!("┌{}┐\n", "─".repeat(width + 2)));
    for (i, (title, regions)) in sections.iter().enumerate() {
        if i > 0 {
            out.push_str(&format!("├{}┤\n", "─".repeat(width + 2)));
        }
        out.push_str(&box_line(title));
        if regions.is_empty() {
            out.push_str(&box_line("(n/a)"));
        } else {
            for region in regions {
                out.push_str(&box_line(&fmt_region(region)));
            }
        }
    }
    out.push_str(&format!("└{}┘\n\n", "─".repeat(width + 2)));
    out
}

/// Full path of the main binary, matched against the inferred process
/// name.
fn main_binary_path(report: &Report) -> Option<&str> {
    let name = &report.metadata().process_name;
    report
        .address_space()
        .regions()
        .iter()
        .filter_map(|r| r.pathname().as_path())
        .find(|path| path.rsplit('/').next() == Some(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    #[test]
    fn test_overview_sections() {
        let space = parse_str(
            "00400000-0040b000 r-xp 00000000 fe:00 917797 /bin/cat\n\
             022cf000-022f0000 rw-p 00000000 00:00 0 [heap]\n\
             7fe59867f000-7fe598681000 r-xp 00000000 fe:00 917523 /lib/libc-2.15.so\n\
             7fff601ca000-7fff601eb000 rw-p 00000000 00:00 0 [stack]",
        )
        .unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        let text = render(&report);

        assert!(text.contains("SEGMENT OVERVIEW"));
        assert!(text.contains("Stack"));
        assert!(text.contains("Shared Libs"));
        assert!(text.contains("/lib/libc-2.15.so"));
        // The main binary's code stays out of the shared-lib section
        let libs_pos = text.find("Shared Libs").unwrap();
        let code_pos = text.find("Code (.text)").unwrap();
        let cat_pos = text.rfind("/bin/cat").unwrap();
        assert!(cat_pos > code_pos && code_pos > libs_pos);
    }

    #[test]
    fn test_missing_sections_marked_na() {
        let space = parse_str("1000-2000 rw-p 00000000 00:00 0 [heap]").unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        assert!(render(&report).contains("(n/a)"));
    }
}
