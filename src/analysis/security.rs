//! Security audit of the region set.
//!
//! The single policy in force: any region that is both writable and
//! executable is a potential code-injection surface and gets one
//! advisory record, whatever its sharing mode or backing.

use crate::maps::AddressSpace;

/// One advisory about a suspicious region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityFinding {
    /// Index into the address space's region list.
    pub region_index: usize,
    pub start: u64,
    pub end: u64,
    /// Four-character permission string as it appeared in the maps.
    pub permissions: String,
    /// Path, pseudo name, or `[anon]`.
    pub pathname: String,
}

/// Audit every region. An empty result means nothing suspicious.
#[must_use]
pub fn audit(space: &AddressSpace) -> Vec<SecurityFinding> {
    space
        .regions()
        .iter()
        .enumerate()
        .filter(|(_, region)| region.is_writable() && region.is_executable())
        .map(|(region_index, region)| SecurityFinding {
            region_index,
            start: region.start(),
            end: region.end(),
            permissions: region.permissions().to_string(),
            pathname: region.pathname().label().to_string(),
        })
        .collect()
}
