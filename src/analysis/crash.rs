//! Crash-context resolution.
//!
//! Maps crash-time register values onto the address space: which region
//! holds each register, at what offset, and what `addr2line` invocation
//! would symbolize it. An unmapped address is a normal outcome here,
//! not an error - for a wild pointer crash it is the interesting case.

use crate::classification::SegmentClass;
use crate::maps::AddressSpace;
use crate::region::Region;

/// Register roles the resolver understands, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterRole {
    Pc,
    Lr,
    Sp,
    Fp,
}

impl RegisterRole {
    pub const ALL: [RegisterRole; 4] =
        [RegisterRole::Pc, RegisterRole::Lr, RegisterRole::Sp, RegisterRole::Fp];

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            RegisterRole::Pc => "PC",
            RegisterRole::Lr => "LR",
            RegisterRole::Sp => "SP",
            RegisterRole::Fp => "FP",
        }
    }

    #[must_use]
    pub fn long_name(self) -> &'static str {
        match self {
            RegisterRole::Pc => "Program Counter (PC)",
            RegisterRole::Lr => "Link Register (LR)",
            RegisterRole::Sp => "Stack Pointer (SP)",
            RegisterRole::Fp => "Frame Pointer (FP)",
        }
    }
}

/// Crash-time register values. Each register is independently optional;
/// an absent register is not the same thing as a register that held
/// zero (a `pc` of zero is an unmapped address worth reporting).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrashContext {
    pub pc: Option<u64>,
    pub lr: Option<u64>,
    pub sp: Option<u64>,
    pub fp: Option<u64>,
}

impl CrashContext {
    /// True when no register was provided at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pc.is_none() && self.lr.is_none() && self.sp.is_none() && self.fp.is_none()
    }

    fn get(&self, role: RegisterRole) -> Option<u64> {
        match role {
            RegisterRole::Pc => self.pc,
            RegisterRole::Lr => self.lr,
            RegisterRole::Sp => self.sp,
            RegisterRole::Fp => self.fp,
        }
    }
}

/// Advisory findings attached to a resolution. Not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The program counter landed in a region without execute
    /// permission.
    PcNotInExecutable,
    /// A stack or frame pointer landed outside any stack region.
    SpOutsideStackRegion,
    /// The containing region is both writable and executable.
    InWritableExecutable,
}

impl Diagnostic {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Diagnostic::PcNotInExecutable => "PC is not in an executable region",
            Diagnostic::SpOutsideStackRegion => "pointer is not in a stack region",
            Diagnostic::InWritableExecutable => "region is both writable and executable",
        }
    }
}

/// Where an address landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved {
        /// Index into the address space's region list.
        region_index: usize,
        /// `address - region.start`; always below the region size.
        offset_in_region: u64,
        /// The path for file-backed regions, the pseudo name otherwise,
        /// `[anon]` for anonymous mappings.
        containing_binary: String,
        /// Ready-to-run `addr2line` invocation; only present for
        /// file-backed code and rodata regions.
        symbolization_command: Option<String>,
    },
    Unmapped,
}

/// Resolution of one provided register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashResolution {
    pub register_role: RegisterRole,
    pub address: u64,
    pub outcome: ResolutionOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// One resolved backtrace address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub address: u64,
    pub outcome: ResolutionOutcome,
}

/// Resolve every provided register, in the fixed `[PC, LR, SP, FP]`
/// order, skipping absent ones.
#[must_use]
pub fn resolve_registers(space: &AddressSpace, ctx: &CrashContext) -> Vec<CrashResolution> {
    RegisterRole::ALL
        .into_iter()
        .filter_map(|role| ctx.get(role).map(|addr| resolve_register(space, role, addr)))
        .collect()
}

/// Resolve one register value.
#[must_use]
pub fn resolve_register(space: &AddressSpace, role: RegisterRole, address: u64) -> CrashResolution {
    let Some(region_index) = space.find_index(address) else {
        return CrashResolution {
            register_role: role,
            address,
            outcome: ResolutionOutcome::Unmapped,
            diagnostics: Vec::new(),
        };
    };
    let region = &space.regions()[region_index];
    let offset_in_region = address - region.start();

    let mut diagnostics = Vec::new();
    if role == RegisterRole::Pc && !region.is_executable() {
        diagnostics.push(Diagnostic::PcNotInExecutable);
    }
    if matches!(role, RegisterRole::Sp | RegisterRole::Fp)
        && region.class() != SegmentClass::Stack
    {
        diagnostics.push(Diagnostic::SpOutsideStackRegion);
    }
    if region.is_writable() && region.is_executable() {
        diagnostics.push(Diagnostic::InWritableExecutable);
    }

    CrashResolution {
        register_role: role,
        address,
        outcome: ResolutionOutcome::Resolved {
            region_index,
            offset_in_region,
            containing_binary: region.pathname().label().to_string(),
            symbolization_command: symbolization_command(region, offset_in_region),
        },
        diagnostics,
    }
}

/// Resolve raw backtrace addresses in their given order.
#[must_use]
pub fn resolve_backtrace(space: &AddressSpace, addresses: &[u64]) -> Vec<BacktraceFrame> {
    addresses
        .iter()
        .map(|&address| {
            let outcome = match space.find_index(address) {
                Some(region_index) => {
                    let region = &space.regions()[region_index];
                    let offset_in_region = address - region.start();
                    ResolutionOutcome::Resolved {
                        region_index,
                        offset_in_region,
                        containing_binary: region.pathname().label().to_string(),
                        symbolization_command: symbolization_command(region, offset_in_region),
                    }
                }
                None => ResolutionOutcome::Unmapped,
            };
            BacktraceFrame { address, outcome }
        })
        .collect()
}

/// The `addr2line` invocation for a file-backed code or rodata region.
///
/// The offset is printed as unpadded lowercase hex (`0x0` for zero) so
/// the command can be pasted verbatim.
#[must_use]
pub fn symbolization_command(region: &Region, offset: u64) -> Option<String> {
    if !matches!(region.class(), SegmentClass::Code | SegmentClass::Rodata) {
        return None;
    }
    let path = region.pathname().as_path()?;
    Some(format!("addr2line -e {path} 0x{offset:x}"))
}
