//! Machine-readable JSON report.
//!
//! Addresses and offsets are emitted as `0x`-prefixed strings so that
//! consumers in languages with 53-bit numbers never silently lose the
//! high bits; counts and byte sizes stay numeric.

use crate::analysis::{Report, ResolutionOutcome};
use crate::domain::ExportError;
use serde_json::{json, Value};
use std::io::Write;

/// JSON report generator over an assembled [`Report`].
pub struct JsonReport<'a> {
    report: &'a Report,
}

impl<'a> JsonReport<'a> {
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Build the document as a `serde_json` value.
    #[must_use]
    pub fn render(&self) -> Value {
        let meta = self.report.metadata();

        let regions: Vec<Value> = self
            .report
            .address_space()
            .regions()
            .iter()
            .map(|region| {
                json!({
                    "start": hex(region.start()),
                    "end": hex(region.end()),
                    "size": region.size(),
                    "permissions": region.permissions().to_string(),
                    "offset": hex(region.file_offset()),
                    "device": { "major": region.device().0, "minor": region.device().1 },
                    "inode": region.inode(),
                    "pathname": region.pathname().label(),
                    "class": region.class().name(),
                })
            })
            .collect();

        let classes: Vec<Value> = self
            .report
            .statistics()
            .classes()
            .iter()
            .map(|class| {
                json!({
                    "class": class.class.name(),
                    "count": class.count,
                    "total_bytes": class.total_bytes,
                    "percentage": class.percentage,
                })
            })
            .collect();

        let groups: Vec<Value> = self
            .report
            .groups()
            .iter()
            .map(|group| {
                json!({
                    "name": group.name,
                    "total_bytes": group.total_bytes,
                    "region_indices": group.region_indices,
                })
            })
            .collect();

        let security: Vec<Value> = self
            .report
            .security_findings()
            .iter()
            .map(|finding| {
                json!({
                    "region_index": finding.region_index,
                    "start": hex(finding.start),
                    "end": hex(finding.end),
                    "permissions": finding.permissions,
                    "pathname": finding.pathname,
                })
            })
            .collect();

        let crash: Value = match self.report.crash_resolutions() {
            Some(resolutions) => resolutions
                .iter()
                .map(|res| {
                    let mut entry = json!({
                        "register": res.register_role.short_name(),
                        "address": hex(res.address),
                        "diagnostics": res
                            .diagnostics
                            .iter()
                            .map(|d| d.message())
                            .collect::<Vec<_>>(),
                    });
                    match &res.outcome {
                        ResolutionOutcome::Resolved {
                            region_index,
                            offset_in_region,
                            containing_binary,
                            symbolization_command,
                        } => {
                            entry["mapped"] = json!(true);
                            entry["region_index"] = json!(region_index);
                            entry["offset_in_region"] = json!(hex(*offset_in_region));
                            entry["containing_binary"] = json!(containing_binary);
                            entry["symbolization_command"] = json!(symbolization_command);
                        }
                        ResolutionOutcome::Unmapped => {
                            entry["mapped"] = json!(false);
                        }
                    }
                    entry
                })
                .collect(),
            None => Value::Null,
        };

        let backtrace: Value = match self.report.backtrace() {
            Some(frames) => frames
                .iter()
                .map(|frame| match &frame.outcome {
                    ResolutionOutcome::Resolved {
                        offset_in_region, containing_binary, ..
                    } => json!({
                        "address": hex(frame.address),
                        "mapped": true,
                        "containing_binary": containing_binary,
                        "offset_in_region": hex(*offset_in_region),
                    }),
                    ResolutionOutcome::Unmapped => {
                        json!({ "address": hex(frame.address), "mapped": false })
                    }
                })
                .collect(),
            None => Value::Null,
        };

        json!({
            "process": {
                "name": meta.process_name,
                "pid": meta.pid.map(|p| p.0),
                "region_count": meta.region_count,
                "total_size": meta.total_size,
                "low_address": meta.low_address.map(hex),
                "high_address": meta.high_address.map(hex),
            },
            "regions": regions,
            "statistics": { "total_bytes": self.report.statistics().total_bytes(), "classes": classes },
            "groups": groups,
            "security_findings": security,
            "crash": crash,
            "backtrace": backtrace,
        })
    }

    /// Write the pretty-printed document to any sink.
    ///
    /// # Errors
    /// Propagates serialization and I/O failures.
    pub fn export<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, &self.render())?;
        Ok(())
    }
}

fn hex(value: u64) -> String {
    format!("0x{value:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrashContext;
    use crate::maps::parse_str;

    const MAPS: &str = "\
0098b000-0098c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt\n\
ff8a0000-ff8c1000 rw-p 00000000 00:00 0 [stack]";

    #[test]
    fn test_json_document_shape() {
        let ctx = CrashContext { pc: Some(0x0098_b100), ..CrashContext::default() };
        let report = Report::assemble(parse_str(MAPS).unwrap(), None, &ctx, &[]);
        let doc = JsonReport::new(&report).render();

        assert_eq!(doc["process"]["name"], "amxrt");
        assert_eq!(doc["regions"].as_array().unwrap().len(), 2);
        assert_eq!(doc["regions"][0]["start"], "0x98b000");
        assert_eq!(doc["regions"][0]["class"], "CODE");
        assert_eq!(doc["regions"][1]["pathname"], "[stack]");

        let crash = doc["crash"].as_array().unwrap();
        assert_eq!(crash[0]["register"], "PC");
        assert_eq!(crash[0]["mapped"], true);
        assert_eq!(crash[0]["offset_in_region"], "0x100");
        assert_eq!(
            crash[0]["symbolization_command"],
            "addr2line -e /usr/bin/amxrt 0x100"
        );
        assert_eq!(doc["backtrace"], Value::Null);
    }

    #[test]
    fn test_json_without_crash_context() {
        let report = Report::assemble(
            parse_str(MAPS).unwrap(),
            None,
            &CrashContext::default(),
            &[],
        );
        let doc = JsonReport::new(&report).render();
        assert_eq!(doc["crash"], Value::Null);
        assert_eq!(doc["process"]["pid"], Value::Null);
        assert_eq!(doc["statistics"]["total_bytes"], 0x1000 + 0x21000);
    }

    #[test]
    fn test_export_writes_valid_json() {
        let report = Report::assemble(
            parse_str(MAPS).unwrap(),
            None,
            &CrashContext::default(),
            &[],
        );
        let mut buffer = Vec::new();
        JsonReport::new(&report).export(&mut buffer).unwrap();
        let parsed: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["process"]["name"], "amxrt");
    }
}
