//! Binary entry point: read one maps snapshot, analyze it once, print
//! or export whatever views were asked for.
//!
//! With no view flags the full report is shown (table, statistics,
//! grouped view, ASCII layout, crash analysis when registers were
//! given, security audit). Individual flags narrow the output to just
//! the selected sections. `--html`/`--json` write files instead of
//! printing.

use anyhow::{Context, Result};
use clap::Parser;
use crashmap::analysis::Report;
use crashmap::cli::Args;
use crashmap::domain::Pid;
use crashmap::export::{HtmlReport, JsonReport};
use crashmap::{maps, procfs, render};
use log::info;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let pid = args.pid.map(Pid);
    let text = match (&args.input, pid) {
        (Some(path), _) => procfs::read_maps_file(path)?,
        (None, Some(pid)) => procfs::read_maps(pid)?,
        (None, None) => unreachable!("clap requires an input file or --pid"),
    };

    let space = maps::parse_str(&text).context("Failed to parse memory map")?;
    info!("loaded {} regions", space.len());

    let report = Report::assemble(space, pid, &args.crash_context(), &args.bt);

    // File exports replace console output, like the HTML mode of old
    // pmap-style tools
    let mut exported = false;
    if let Some(ref path) = args.html {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        HtmlReport::new(&report)
            .export(BufWriter::new(file))
            .context("Failed to write HTML report")?;
        println!("✓ HTML visualization saved to: {}", path.display());
        exported = true;
    }
    if let Some(ref path) = args.json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        JsonReport::new(&report)
            .export(BufWriter::new(file))
            .context("Failed to write JSON report")?;
        println!("✓ JSON report saved to: {}", path.display());
        exported = true;
    }
    if exported {
        return Ok(());
    }

    let show_all = args.report || !args.any_view_selected();
    let has_crash = report.crash_resolutions().is_some() || report.backtrace().is_some();

    if show_all || args.table {
        print!("{}", render::table::render(&report));
    }
    if show_all || args.stats {
        print!("{}", render::statistics::render(&report));
    }
    if show_all || args.grouped {
        print!("{}", render::grouped::render(&report));
    }
    if args.segments {
        print!("{}", render::overview::render(&report));
    }
    if show_all || args.ascii {
        print!("{}", render::ascii::render(&report));
    }
    if has_crash {
        print!("{}", render::crash::render(&report));
    }
    if show_all || args.security {
        print!("{}", render::security::render(&report));
    }

    Ok(())
}
