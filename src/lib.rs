//! # crashmap - Crash Analysis for Linux Process Memory Maps
//!
//! crashmap inspects the virtual-memory layout of a Linux process, either
//! post-mortem from a captured `/proc/<pid>/maps` dump or live from `/proc`,
//! and overlays crash-time register values onto it: which binary the program
//! counter died in, at what offset, and whether anything about the layout
//! looks wrong (stack pointer outside the stack, writable+executable
//! mappings).
//!
//! ## Architecture Overview
//!
//! ```text
//! maps dump ──┐
//!             ├──▶ Parser ──▶ AddressSpace ──▶ Analysis ──▶ Report ──▶ Renderers
//! /proc/<pid>─┘    (maps)      (immutable,      (crash,      (one        (console,
//!                               ordered,         stats,       immutable    HTML,
//!                               indexed)         security)    bundle)      JSON)
//!                                                  ▲
//!                                 PC/LR/SP/FP ─────┘
//! ```
//!
//! The pipeline is single-threaded and synchronous: one parse pass builds an
//! immutable [`maps::AddressSpace`], every analysis is a pure read over it,
//! and the assembled [`analysis::Report`] is the only thing formatters see.
//! The sole blocking operation is reading the input text.
//!
//! ## Module Structure
//!
//! - [`domain`]: core value types (permissions, pathnames, PIDs) and the
//!   parse/export error taxonomy
//! - [`region`]: one mapping, built through a validating factory
//! - [`classification`]: permissions + pathname → semantic segment class
//! - [`maps`]: the line-grammar parser and the indexed address space
//! - [`procfs`]: reading `/proc/<pid>/maps` and captured dumps
//! - [`analysis`]: crash resolution, statistics, security audit, metadata,
//!   and the report assembler
//! - [`render`]: pure text formatters for the console reports
//! - [`export`]: self-contained HTML and JSON report writers
//! - [`cli`]: command-line argument parsing
//!
//! ## Typical Usage
//!
//! ```bash
//! # Everything about a captured dump
//! crashmap memmap.txt
//!
//! # Where did the crash land?
//! crashmap memmap.txt --pc 0xf79e245c --sp 0xff8b0000
//!
//! # Live process, HTML report
//! crashmap --pid 1234 --html layout.html
//! ```
//!
//! Symbolization itself stays out of scope: for code addresses the crash
//! resolver emits a ready-to-run `addr2line` invocation instead of parsing
//! DWARF here.

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod domain;
pub mod export;
pub mod maps;
pub mod procfs;
pub mod region;
pub mod render;
