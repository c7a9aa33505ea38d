//! Pre-computed line offset table for efficient line/column lookup.
//!
//! Builds a table of byte offsets for each line start, enabling O(log L)
//! binary search lookups instead of O(n) linear scans. Every diagnostic the
//! driver translates resolves at least one location, most resolve several.

use crate::LineCol;

/// Line start offsets for one source text.
///
/// # Example
///
/// ```
/// use hostc_source::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_col(source, 0).line, 1);
/// assert_eq!(table.line_col(source, 6).line, 2);
/// assert_eq!(table.line_col(source, 12).column, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// Byte offset of each line start.
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset using binary search.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get the 1-based line and column of a byte offset.
    ///
    /// Offsets past the end of `source` clamp to the end. An offset inside
    /// a multi-byte character counts the partial character as not yet
    /// reached.
    pub fn line_col(&self, source: &str, offset: u32) -> LineCol {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        // Count UTF-8 lead bytes so an offset inside a character still works.
        let column = source.as_bytes()[line_start..end]
            .iter()
            .filter(|byte| (**byte & 0xC0) != 0x80)
            .count();
        LineCol {
            line,
            column: u32::try_from(column).unwrap_or(u32::MAX - 1) + 1,
        }
    }

    /// Get the byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
