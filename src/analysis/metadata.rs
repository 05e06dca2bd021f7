//! Process metadata derived from the address space.

use crate::classification::SegmentClass;
use crate::domain::Pid;
use crate::maps::AddressSpace;

/// Identity and aggregates of the inspected process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetadata {
    /// File name of the first executable file-backed mapping, or
    /// `"Unknown"` when the map contains none.
    pub process_name: String,
    /// Only known when the snapshot was read live from `/proc`; never
    /// inferred from the map text itself.
    pub pid: Option<Pid>,
    pub region_count: usize,
    pub total_size: u64,
    pub low_address: Option<u64>,
    pub high_address: Option<u64>,
}

/// One pass over the regions, stopping at the first name match.
#[must_use]
pub fn extract(space: &AddressSpace, pid: Option<Pid>) -> ProcessMetadata {
    let process_name = space
        .regions()
        .iter()
        .find(|r| r.class() == SegmentClass::Code && r.is_file_backed())
        .and_then(|r| r.pathname().as_path())
        .map_or_else(|| "Unknown".to_string(), |path| basename(path).to_string());

    let span = space.span();
    ProcessMetadata {
        process_name,
        pid,
        region_count: space.len(),
        total_size: space.total_size(),
        low_address: span.map(|(low, _)| low),
        high_address: span.map(|(_, high)| high),
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
