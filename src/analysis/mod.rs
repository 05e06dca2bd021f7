//! # Analysis over a parsed address space
//!
//! Every analysis here is a pure, single-pass function of the immutable
//! [`AddressSpace`](crate::maps::AddressSpace) (plus the register inputs
//! for crash resolution). Nothing performs I/O and nothing mutates.
//!
//! - **`crash`** - resolve crash-time register values to region + offset
//! - **`statistics`** - per-class totals and grouping by backing binary
//! - **`security`** - writable+executable audit
//! - **`metadata`** - process name inference and aggregates
//! - **`report`** - the immutable bundle handed to formatters

pub mod crash;
pub mod metadata;
pub mod report;
pub mod security;
pub mod statistics;

pub use crash::{
    resolve_backtrace, resolve_registers, BacktraceFrame, CrashContext, CrashResolution,
    Diagnostic, RegisterRole, ResolutionOutcome,
};
pub use metadata::ProcessMetadata;
pub use report::Report;
pub use security::SecurityFinding;
pub use statistics::{BinaryGroup, ClassStats, SegmentStatistics};
