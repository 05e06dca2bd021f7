//! Aggregation of the region list into per-class totals and per-binary
//! groups.

// Percentage calculations intentionally convert u64 to f64
#![allow(clippy::cast_precision_loss)]

use crate::classification::SegmentClass;
use crate::maps::AddressSpace;
use std::collections::HashMap;

/// Totals for one segment class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    pub class: SegmentClass,
    pub count: usize,
    pub total_bytes: u64,
    /// Share of all mapped bytes, 0.0 - 100.0, full precision. Display
    /// rounding is the renderer's business.
    pub percentage: f64,
}

/// Per-class totals over a whole address space.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStatistics {
    classes: Vec<ClassStats>,
    total_bytes: u64,
    region_count: usize,
}

impl SegmentStatistics {
    /// Single pass over the regions. An empty space yields empty
    /// statistics, not an error.
    #[must_use]
    pub fn compute(space: &AddressSpace) -> Self {
        let total_bytes = space.total_size();
        let mut counts: HashMap<SegmentClass, (usize, u64)> = HashMap::new();

        for region in space.regions() {
            let entry = counts.entry(region.class()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += region.size();
        }

        // Fixed class order keeps the output deterministic
        let classes = SegmentClass::ALL
            .into_iter()
            .filter_map(|class| {
                let &(count, bytes) = counts.get(&class)?;
                let percentage =
                    if total_bytes > 0 { (bytes as f64 / total_bytes as f64) * 100.0 } else { 0.0 };
                Some(ClassStats { class, count, total_bytes: bytes, percentage })
            })
            .collect();

        Self { classes, total_bytes, region_count: space.len() }
    }

    /// Observed classes in display order; classes with no regions are
    /// omitted.
    #[must_use]
    pub fn classes(&self) -> &[ClassStats] {
        &self.classes
    }

    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    #[must_use]
    pub fn region_count(&self) -> usize {
        self.region_count
    }
}

/// All regions sharing one backing, in ascending start order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryGroup {
    /// Path, pseudo name, or `[anon]` for the anonymous bucket.
    pub name: String,
    /// Indices into the address space's region list.
    pub region_indices: Vec<usize>,
    pub total_bytes: u64,
}

/// Group regions by their backing binary (or pseudo name, or the shared
/// `[anon]` bucket).
///
/// Groups appear in order of their first region's start address;
/// within a group, regions keep their ascending start order.
#[must_use]
pub fn group_by_binary(space: &AddressSpace) -> Vec<BinaryGroup> {
    let mut groups: Vec<BinaryGroup> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for (i, region) in space.regions().iter().enumerate() {
        let name = region.pathname().label();
        let group_index = match index_of.get(name) {
            Some(&g) => g,
            None => {
                index_of.insert(name.to_string(), groups.len());
                groups.push(BinaryGroup {
                    name: name.to_string(),
                    region_indices: Vec::new(),
                    total_bytes: 0,
                });
                groups.len() - 1
            }
        };
        groups[group_index].region_indices.push(i);
        groups[group_index].total_bytes += region.size();
    }

    groups
}
