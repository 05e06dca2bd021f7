//! Report export
//!
//! This module writes the assembled report to files for consumption
//! outside the terminal: a self-contained HTML visualization and a
//! machine-readable JSON document.

pub mod html;
pub mod json;

pub use html::HtmlReport;
pub use json::JsonReport;
