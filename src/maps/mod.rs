//! # Memory-map ingestion
//!
//! Turns the textual `/proc/<pid>/maps` snapshot into a validated,
//! immutable [`AddressSpace`].
//!
//! - **`parser`** - line-grammar parsing and invariant validation
//! - **`address_space`** - the ordered region collection with O(log N)
//!   address lookup

pub mod address_space;
pub mod parser;

pub use address_space::AddressSpace;
pub use parser::{parse_lines, parse_str};
