//! Source manager with remapped in-memory buffers.
//!
//! The engine never opens files itself; it asks the [`SourceManager`] to
//! `load` a path. A remapped buffer registered for that exact path wins over
//! whatever is on disk. Each path is loaded at most once per manager, so
//! repeated references to the same file share one [`FileId`].

use std::fmt;
use std::io;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{FileId, LineCol, LineOffsetTable, Span};

/// Error raised when a file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read from disk.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The file is larger than a span can address.
    #[error("{path}: file of {len} bytes exceeds the 4 GiB source limit")]
    TooLarge { path: String, len: usize },
}

impl SourceError {
    /// A short reason suitable for a diagnostic argument.
    pub fn reason(&self) -> String {
        match self {
            SourceError::Io { source, .. } => source.to_string(),
            SourceError::TooLarge { .. } => "file too large".to_string(),
        }
    }
}

/// Where a loaded file's contents came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceOrigin {
    /// An in-memory buffer supplied by the host.
    Remapped,
    /// Read from the filesystem.
    Disk,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::Remapped => write!(f, "remapped buffer"),
            SourceOrigin::Disk => write!(f, "disk"),
        }
    }
}

/// A loaded source file.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: String,
    text: Arc<str>,
    origin: SourceOrigin,
    lines: LineOffsetTable,
}

impl SourceFile {
    fn new(path: String, text: Arc<str>, origin: SourceOrigin) -> Self {
        let lines = LineOffsetTable::build(&text);
        SourceFile {
            path,
            text,
            origin,
            lines,
        }
    }

    /// The path the file was loaded under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full text of the file.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Where the text came from.
    pub fn origin(&self) -> SourceOrigin {
        self.origin
    }

    /// Resolve a byte offset to a 1-based line and column.
    pub fn line_col(&self, offset: u32) -> LineCol {
        self.lines.line_col(&self.text, offset)
    }

    /// The source text covered by `span`, or `""` if it is out of range.
    pub fn snippet(&self, span: Span) -> &str {
        self.text
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }
}

/// Loads and owns the source files of one compilation.
#[derive(Clone, Debug, Default)]
pub struct SourceManager {
    /// Host-supplied buffers keyed by exact path.
    remapped: FxHashMap<String, Arc<str>>,
    /// Loaded files, indexed by `FileId`.
    files: Vec<SourceFile>,
    /// Path to id for files already loaded.
    by_path: FxHashMap<String, FileId>,
}

impl SourceManager {
    /// Create an empty source manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source manager pre-populated with remapped buffers.
    pub fn with_remapped<I, P>(buffers: I) -> Self
    where
        I: IntoIterator<Item = (P, Arc<str>)>,
        P: Into<String>,
    {
        let mut manager = Self::new();
        for (path, contents) in buffers {
            manager.remap(path, contents);
        }
        manager
    }

    /// Register an in-memory buffer for `path`.
    ///
    /// A later call for the same path replaces the earlier buffer. Files
    /// that were already loaded keep the text they were loaded with.
    pub fn remap(&mut self, path: impl Into<String>, contents: Arc<str>) {
        let path = path.into();
        trace!(path = %path, len = contents.len(), "remapping source buffer");
        self.remapped.insert(path, contents);
    }

    /// Check whether `path` has a remapped buffer.
    pub fn is_remapped(&self, path: &str) -> bool {
        self.remapped.contains_key(path)
    }

    /// Number of remapped buffers.
    pub fn remapped_count(&self) -> usize {
        self.remapped.len()
    }

    /// Load `path`, preferring a remapped buffer over the filesystem.
    ///
    /// Loading the same path twice returns the same id.
    pub fn load(&mut self, path: &str) -> Result<FileId, SourceError> {
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }

        let (text, origin) = if let Some(buffer) = self.remapped.get(path) {
            (Arc::clone(buffer), SourceOrigin::Remapped)
        } else {
            let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                path: path.to_string(),
                source,
            })?;
            (Arc::from(text), SourceOrigin::Disk)
        };

        if u32::try_from(text.len()).is_err() {
            return Err(SourceError::TooLarge {
                path: path.to_string(),
                len: text.len(),
            });
        }

        let id = FileId::from_raw(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        debug!(path, %origin, id = id.raw(), "loaded source file");
        self.files
            .push(SourceFile::new(path.to_string(), text, origin));
        self.by_path.insert(path.to_string(), id);
        Ok(id)
    }

    /// Look up a loaded file.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    /// Iterate over loaded files in load order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, file)| (FileId::from_raw(u32::try_from(i).unwrap_or(u32::MAX)), file))
    }

    /// Resolve the start of a span to its file path and line/column.
    pub fn resolve(&self, span: Span) -> Option<(&str, LineCol)> {
        let file = self.file(span.file)?;
        Some((file.path(), file.line_col(span.start)))
    }
}
