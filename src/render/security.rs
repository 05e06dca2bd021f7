//! Security audit printout.

#![allow(clippy::format_push_string)]

use crate::analysis::Report;
use crate::render::banner;

const WIDTH: usize = 90;

#[must_use]
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&banner("SECURITY ANALYSIS", WIDTH));
    out.push('\n');

    let findings = report.security_findings();
    if findings.is_empty() {
        out.push_str("✓ No suspicious writable+executable regions found.\n\n");
        return out;
    }

    out.push_str("Security issues found:\n");
    for finding in findings {
        out.push_str(&format!(
            "  ⚠️  WRITABLE+EXECUTABLE: 0x{:08x}-0x{:08x} {} {}\n",
            finding.start, finding.end, finding.permissions, finding.pathname
        ));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    #[test]
    fn test_findings_listed() {
        let space =
            parse_str("1000-2000 rwxp 00000000 08:01 42 /usr/bin/myapp").unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        let text = render(&report);
        assert!(text.contains("WRITABLE+EXECUTABLE: 0x00001000-0x00002000 rwxp /usr/bin/myapp"));
    }

    #[test]
    fn test_clean_report() {
        let space = parse_str("1000-2000 r-xp 00000000 08:01 42 /usr/bin/myapp").unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        assert!(render(&report).contains("✓ No suspicious writable+executable regions found."));
    }
}
