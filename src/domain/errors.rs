//! Structured error types for crashmap
//!
//! Using thiserror for automatic Display implementation and error chaining.

use thiserror::Error;

/// Why a maps line (or the line sequence) was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorReason {
    #[error("line does not match the maps format")]
    MalformedLine,

    #[error("region start is not below region end")]
    InvalidRange,

    #[error("permission string is not of the form [r-][w-][x-][ps]")]
    InvalidPermissions,

    #[error("region start is below the previous region's start")]
    OutOfOrder,

    #[error("region overlaps the previous region")]
    OverlapsPrevious,
}

/// Fatal parse failure. The whole input is rejected; no partial address
/// space is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("maps line {line_number}: {reason}")]
pub struct ParseError {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub reason: ParseErrorReason,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no memory regions to visualize")]
    EmptyAddressSpace,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
