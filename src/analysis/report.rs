//! The assembled report: everything the formatters consume, computed
//! once, immutable afterwards.

use crate::analysis::crash::{
    resolve_backtrace, resolve_registers, BacktraceFrame, CrashContext, CrashResolution,
};
use crate::analysis::metadata::{self, ProcessMetadata};
use crate::analysis::security::{self, SecurityFinding};
use crate::analysis::statistics::{group_by_binary, BinaryGroup, SegmentStatistics};
use crate::domain::Pid;
use crate::maps::AddressSpace;

/// One self-consistent snapshot of every analysis result.
///
/// Formatters only read from this; by the time they see it, all fields
/// are fully computed against the same address space.
#[derive(Debug)]
pub struct Report {
    address_space: AddressSpace,
    metadata: ProcessMetadata,
    statistics: SegmentStatistics,
    groups: Vec<BinaryGroup>,
    security: Vec<SecurityFinding>,
    crash: Option<Vec<CrashResolution>>,
    backtrace: Option<Vec<BacktraceFrame>>,
}

impl Report {
    /// Run every analysis over a parsed address space.
    ///
    /// Crash resolutions are only present when at least one register
    /// was provided; a backtrace section only when addresses were
    /// given.
    #[must_use]
    pub fn assemble(
        address_space: AddressSpace,
        pid: Option<Pid>,
        crash_context: &CrashContext,
        backtrace_addresses: &[u64],
    ) -> Self {
        let metadata = metadata::extract(&address_space, pid);
        let statistics = SegmentStatistics::compute(&address_space);
        let groups = group_by_binary(&address_space);
        let security = security::audit(&address_space);
        let crash = (!crash_context.is_empty())
            .then(|| resolve_registers(&address_space, crash_context));
        let backtrace = (!backtrace_addresses.is_empty())
            .then(|| resolve_backtrace(&address_space, backtrace_addresses));

        Self { address_space, metadata, statistics, groups, security, crash, backtrace }
    }

    #[must_use]
    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    #[must_use]
    pub fn metadata(&self) -> &ProcessMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn statistics(&self) -> &SegmentStatistics {
        &self.statistics
    }

    #[must_use]
    pub fn groups(&self) -> &[BinaryGroup] {
        &self.groups
    }

    #[must_use]
    pub fn security_findings(&self) -> &[SecurityFinding] {
        &self.security
    }

    #[must_use]
    pub fn crash_resolutions(&self) -> Option<&[CrashResolution]> {
        self.crash.as_deref()
    }

    #[must_use]
    pub fn backtrace(&self) -> Option<&[BacktraceFrame]> {
        self.backtrace.as_deref()
    }
}
