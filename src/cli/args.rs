//! CLI argument definitions

use crate::analysis::CrashContext;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crashmap",
    version,
    about = "Crash analysis for Linux process memory maps",
    after_help = "Examples:\n  \
        crashmap memmap.txt                         # all reports\n  \
        crashmap --pid 1234                         # live process\n  \
        crashmap memmap.txt --table                 # only the table view\n  \
        crashmap memmap.txt --pc 0xf79e245c         # crash analysis for PC\n  \
        crashmap memmap.txt --pc f79e245c --sp ff8b0000 --html crash.html"
)]
pub struct Args {
    /// Memory map dump file, as captured from /proc/<pid>/maps
    #[arg(value_name = "MAPS_FILE", required_unless_present = "pid", conflicts_with = "pid")]
    pub input: Option<PathBuf>,

    /// Read the memory map of a running process instead of a dump file
    #[arg(short, long)]
    pub pid: Option<i32>,

    /// Program counter at crash time (hex, 0x prefix optional)
    #[arg(long, value_name = "ADDR", value_parser = parse_hex_address)]
    pub pc: Option<u64>,

    /// Link register at crash time (hex)
    #[arg(long, value_name = "ADDR", value_parser = parse_hex_address)]
    pub lr: Option<u64>,

    /// Stack pointer at crash time (hex)
    #[arg(long, value_name = "ADDR", value_parser = parse_hex_address)]
    pub sp: Option<u64>,

    /// Frame pointer at crash time (hex)
    #[arg(long, value_name = "ADDR", value_parser = parse_hex_address)]
    pub fp: Option<u64>,

    /// Raw backtrace addresses (comma-separated hex)
    #[arg(long, value_name = "ADDR,ADDR,...", value_delimiter = ',', value_parser = parse_hex_address)]
    pub bt: Vec<u64>,

    /// Show all reports (the default when no view is selected)
    #[arg(long)]
    pub report: bool,

    /// Show the memory map table view
    #[arg(long)]
    pub table: bool,

    /// Show memory statistics
    #[arg(long)]
    pub stats: bool,

    /// Show the memory map grouped by binary
    #[arg(long)]
    pub grouped: bool,

    /// Show the segment overview box
    #[arg(long)]
    pub segments: bool,

    /// Show the ASCII memory layout
    #[arg(long)]
    pub ascii: bool,

    /// Show the security analysis
    #[arg(long)]
    pub security: bool,

    /// Write an HTML visualization (default file: report.html)
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "report.html")]
    pub html: Option<PathBuf>,

    /// Write a JSON report
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

impl Args {
    /// Crash registers as provided; absent flags stay absent.
    #[must_use]
    pub fn crash_context(&self) -> CrashContext {
        CrashContext { pc: self.pc, lr: self.lr, sp: self.sp, fp: self.fp }
    }

    /// True when any specific console view was requested.
    #[must_use]
    pub fn any_view_selected(&self) -> bool {
        self.report
            || self.table
            || self.stats
            || self.grouped
            || self.segments
            || self.ascii
            || self.security
            || !self.crash_context().is_empty()
            || !self.bt.is_empty()
    }
}

/// Hex scalar, `0x` prefix optional, case-insensitive, leading zeros
/// permitted.
fn parse_hex_address(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16)
        .map_err(|_| format!("'{s}' is not a valid hex address"))
}
