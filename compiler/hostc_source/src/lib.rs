//! Source layer for hostc.
//!
//! Owns everything the engine needs to turn a path into text and a byte
//! offset back into a human-readable location:
//!
//! - [`Span`] and [`FileId`]: compact byte ranges tagged with their file
//! - [`LineOffsetTable`]: O(log L) offset to (line, column) lookup
//! - [`SourceManager`]: loads files, consulting remapped in-memory buffers
//!   before the filesystem
//!
//! # Remapped Buffers
//!
//! ```text
//! let mut sources = SourceManager::new();
//! sources.remap("input.swift", Arc::from("let x = y\n"));
//! let id = sources.load("input.swift")?; // never touches the disk
//! ```

mod line_table;
mod manager;
mod span;

pub use line_table::LineOffsetTable;
pub use manager::{SourceError, SourceFile, SourceManager, SourceOrigin};
pub use span::{FileId, LineCol, Span};
