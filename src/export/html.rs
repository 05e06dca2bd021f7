//! Self-contained HTML visualization of the address space.
//!
//! One output file, no external assets: a proportional memory bar
//! colored by segment class with crash-register markers, a legend, the
//! statistics table, the crash analysis, and the full region table.

#![allow(clippy::format_push_string)]
// Bar geometry intentionally converts u64 spans to f64
#![allow(clippy::cast_precision_loss)]

use crate::analysis::{Report, ResolutionOutcome};
use crate::classification::SegmentClass;
use crate::domain::ExportError;
use crate::render::format_bytes;
use std::io::Write;

/// Display color for each segment class.
#[must_use]
pub fn segment_color(class: SegmentClass) -> &'static str {
    match class {
        SegmentClass::Code => "#4CAF50",
        SegmentClass::Data => "#2196F3",
        SegmentClass::Rodata => "#9C27B0",
        SegmentClass::Heap => "#F44336",
        SegmentClass::Stack => "#00BCD4",
        SegmentClass::Anon => "#9E9E9E",
        SegmentClass::Vdso => "#795548",
        SegmentClass::Unknown => "#607D8B",
    }
}

/// HTML report generator over an assembled [`Report`].
pub struct HtmlReport<'a> {
    report: &'a Report,
}

impl<'a> HtmlReport<'a> {
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Render the full document.
    ///
    /// # Errors
    /// Fails with `EmptyAddressSpace` when there is nothing to draw.
    pub fn render(&self) -> Result<String, ExportError> {
        let Some((min_addr, max_addr)) = self.report.address_space().span() else {
            return Err(ExportError::EmptyAddressSpace);
        };
        let total_range = max_addr - min_addr;

        let meta = self.report.metadata();
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "<title>Process Map Analysis - {}</title>\n",
            escape(&meta.process_name)
        ));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");

        html.push_str("<div class=\"header\">\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(&meta.process_name)));
        html.push_str(&format!(
            "<p>PID: {} · {} regions · {} bytes mapped · 0x{min_addr:08x} - 0x{max_addr:08x}</p>\n",
            meta.pid.map_or_else(|| "-".to_string(), |p| p.to_string()),
            meta.region_count,
            format_bytes(meta.total_size)
        ));
        html.push_str("</div>\n");

        self.push_memory_bar(&mut html, min_addr, total_range);
        self.push_legend(&mut html);
        self.push_statistics(&mut html);
        self.push_crash(&mut html);
        self.push_table(&mut html);

        html.push_str("</div>\n</body>\n</html>\n");
        Ok(html)
    }

    /// Render and write to any sink.
    ///
    /// # Errors
    /// Propagates render and I/O failures.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let html = self.render()?;
        writer.write_all(html.as_bytes())?;
        Ok(())
    }

    fn push_memory_bar(&self, html: &mut String, min_addr: u64, total_range: u64) {
        html.push_str("<h2>Memory Layout</h2>\n<div class=\"membar\">\n");

        for region in self.report.address_space().regions() {
            let left = ((region.start() - min_addr) as f64 / total_range as f64) * 100.0;
            let width =
                ((region.size() as f64 / total_range as f64) * 100.0).max(0.3);
            html.push_str(&format!(
                "<div class=\"seg\" style=\"left:{left:.4}%;width:{width:.4}%;background:{}\" \
                 title=\"0x{:x}-0x{:x} {} {} {}\"></div>\n",
                segment_color(region.class()),
                region.start(),
                region.end(),
                region.permissions(),
                region.class().name(),
                escape(region.pathname().label())
            ));
        }

        if let Some(resolutions) = self.report.crash_resolutions() {
            for res in resolutions {
                if matches!(res.outcome, ResolutionOutcome::Resolved { .. }) {
                    let left =
                        ((res.address - min_addr) as f64 / total_range as f64) * 100.0;
                    html.push_str(&format!(
                        "<div class=\"marker\" style=\"left:{left:.4}%\" \
                         title=\"{} = 0x{:x}\">{}</div>\n",
                        res.register_role.short_name(),
                        res.address,
                        res.register_role.short_name()
                    ));
                }
            }
        }

        html.push_str("</div>\n");
    }

    fn push_legend(&self, html: &mut String) {
        html.push_str("<div class=\"legend\">\n");
        for class in SegmentClass::ALL {
            html.push_str(&format!(
                "<span><i style=\"background:{}\"></i>{}</span>\n",
                segment_color(class),
                class.name()
            ));
        }
        html.push_str("</div>\n");
    }

    fn push_statistics(&self, html: &mut String) {
        html.push_str("<h2>Statistics</h2>\n<table>\n");
        html.push_str(
            "<tr><th>Segment Type</th><th>Count</th><th>Total Size</th><th>Percentage</th></tr>\n",
        );
        for class in self.report.statistics().classes() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{} bytes</td><td>{:.2}%</td></tr>\n",
                class.class.name(),
                class.count,
                format_bytes(class.total_bytes),
                class.percentage
            ));
        }
        html.push_str("</table>\n");
    }

    fn push_crash(&self, html: &mut String) {
        let Some(resolutions) = self.report.crash_resolutions() else {
            return;
        };
        html.push_str("<h2>Crash Context</h2>\n");

        for res in resolutions {
            html.push_str("<div class=\"crash\">\n");
            html.push_str(&format!(
                "<h3>{} = 0x{:016x}</h3>\n",
                res.register_role.long_name(),
                res.address
            ));
            match &res.outcome {
                ResolutionOutcome::Resolved {
                    region_index,
                    offset_in_region,
                    containing_binary,
                    symbolization_command,
                } => {
                    let region = &self.report.address_space().regions()[*region_index];
                    html.push_str(&format!(
                        "<p>{} [{}] · permissions {} · offset 0x{offset_in_region:x}</p>\n",
                        escape(containing_binary),
                        region.class().name(),
                        region.permissions()
                    ));
                    if let Some(command) = symbolization_command {
                        html.push_str(&format!("<code>{}</code>\n", escape(command)));
                    }
                    for diagnostic in &res.diagnostics {
                        html.push_str(&format!(
                            "<p class=\"warn\">⚠ {}</p>\n",
                            diagnostic.message()
                        ));
                    }
                }
                ResolutionOutcome::Unmapped => {
                    html.push_str("<p class=\"warn\">⚠ Address not found in any mapped region</p>\n");
                }
            }
            html.push_str("</div>\n");
        }
    }

    fn push_table(&self, html: &mut String) {
        html.push_str("<h2>Regions</h2>\n<table>\n");
        html.push_str(
            "<tr><th>Start</th><th>End</th><th>Size</th><th>Perms</th>\
             <th>Type</th><th>Binary/Mapping</th></tr>\n",
        );
        for region in self.report.address_space().regions() {
            html.push_str(&format!(
                "<tr><td>0x{:08x}</td><td>0x{:08x}</td><td>{}</td><td>{}</td>\
                 <td><span class=\"tag\" style=\"background:{}\">{}</span></td><td>{}</td></tr>\n",
                region.start(),
                region.end(),
                format_bytes(region.size()),
                region.permissions(),
                segment_color(region.class()),
                region.class().name(),
                escape(region.pathname().label())
            ));
        }
        html.push_str("</table>\n");
    }
}

/// Minimal HTML entity escaping for paths and commands.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

const STYLE: &str = "<style>\n\
* { margin: 0; padding: 0; box-sizing: border-box; }\n\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;\n\
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);\n\
  padding: 10px; color: #333; font-size: 15px; }\n\
.container { max-width: 1200px; margin: 0 auto; background: white;\n\
  border-radius: 5px; box-shadow: 0 5px 20px rgba(0,0,0,0.2); padding: 20px; }\n\
.header { background: linear-gradient(135deg, #2c3e50 0%, #34495e 100%);\n\
  color: white; padding: 15px 20px; text-align: center; border-radius: 5px; }\n\
h2 { margin: 20px 0 10px; }\n\
.membar { position: relative; height: 64px; background: #eceff1;\n\
  border-radius: 3px; overflow: hidden; }\n\
.seg { position: absolute; top: 0; height: 40px; }\n\
.marker { position: absolute; top: 40px; height: 24px; border-left: 2px solid #c62828;\n\
  color: #c62828; font-size: 11px; font-weight: bold; padding-left: 2px; }\n\
.legend { margin: 8px 0 16px; }\n\
.legend span { margin-right: 12px; font-size: 13px; }\n\
.legend i { display: inline-block; width: 12px; height: 12px; margin-right: 4px; }\n\
table { border-collapse: collapse; width: 100%; font-size: 14px; }\n\
th, td { border: 1px solid #cfd8dc; padding: 4px 8px; text-align: left;\n\
  font-family: monospace; }\n\
th { background: #37474f; color: white; }\n\
.tag { color: white; padding: 1px 6px; border-radius: 3px; font-size: 12px; }\n\
.crash { border: 1px solid #cfd8dc; border-left: 4px solid #c62828;\n\
  padding: 8px 12px; margin-bottom: 8px; }\n\
.crash code { display: block; background: #eceff1; padding: 4px 8px; margin-top: 4px; }\n\
.warn { color: #c62828; }\n\
</style>\n";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    const MAPS: &str = "\
0098b000-0098c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt\n\
ff8a0000-ff8c1000 rw-p 00000000 00:00 0 [stack]";

    #[test]
    fn test_html_contains_sections() {
        let ctx = CrashContext { pc: Some(0x0098_b100), ..CrashContext::default() };
        let report = Report::assemble(parse_str(MAPS).unwrap(), None, &ctx, &[]);
        let html = HtmlReport::new(&report).render().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Process Map Analysis - amxrt</title>"));
        assert!(html.contains("Memory Layout"));
        assert!(html.contains("Crash Context"));
        assert!(html.contains("addr2line -e /usr/bin/amxrt 0x100"));
        assert!(html.contains(segment_color(SegmentClass::Stack)));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_empty_space_is_an_export_error() {
        let report = Report::assemble(
            parse_str("").unwrap(),
            None,
            &CrashContext::default(),
            &[],
        );
        let err = HtmlReport::new(&report).render().unwrap_err();
        assert!(matches!(err, ExportError::EmptyAddressSpace));
    }

    #[test]
    fn test_paths_are_escaped() {
        let space =
            parse_str("1000-2000 r-xp 00000000 08:01 42 /tmp/<evil>&app").unwrap();
        let report = Report::assemble(space, None, &CrashContext::default(), &[]);
        let html = HtmlReport::new(&report).render().unwrap();
        assert!(html.contains("/tmp/&lt;evil&gt;&amp;app"));
        assert!(!html.contains("<evil>"));
    }
}
