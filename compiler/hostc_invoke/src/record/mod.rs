//! The stable diagnostic record handed to observers.
//!
//! [`Diagnostic`] is a view over one engine emission, valid for exactly one
//! handler call: it borrows the engine's diagnostic and the source manager,
//! so it cannot outlive the callback. Location, ranges, fix-its and the
//! rendered message are translated on first access and cached, which keeps
//! every accessor idempotent and lets handlers that only look at the
//! severity skip the translation work entirely.

use std::cell::OnceCell;
use std::fmt;

use hostc_diagnostic::{DiagnosticKind, FormatOptions};
use hostc_source::{SourceManager, Span};
use smallvec::SmallVec;

/// Severity as observers see it.
///
/// Exactly four values; engine-internal kinds that are not reportable
/// never reach an observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Remark,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Note,
        Severity::Remark,
    ];

    /// Map an engine kind. `None` for the engine's internal `Bug` kind.
    pub fn from_kind(kind: DiagnosticKind) -> Option<Self> {
        match kind {
            DiagnosticKind::Error => Some(Severity::Error),
            DiagnosticKind::Warning => Some(Severity::Warning),
            DiagnosticKind::Note => Some(Severity::Note),
            DiagnosticKind::Remark => Some(Severity::Remark),
            DiagnosticKind::Bug => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Remark => "remark",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 1-based file position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Counted in characters.
    pub column: u32,
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A highlighted region: a start location and a length in bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range<'a> {
    pub location: Location<'a>,
    pub length: u32,
}

/// A suggested edit. An empty `replacement` deletes the range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixIt<'a> {
    pub range: Range<'a>,
    pub replacement: &'a str,
}

/// One diagnostic, as seen from inside a handler call.
pub struct Diagnostic<'a> {
    inner: &'a hostc_diagnostic::Diagnostic,
    sources: &'a SourceManager,
    id: u64,
    severity: Severity,
    location: OnceCell<Option<Location<'a>>>,
    ranges: OnceCell<SmallVec<[Range<'a>; 2]>>,
    fixits: OnceCell<SmallVec<[FixIt<'a>; 1]>>,
    message: OnceCell<String>,
}

impl<'a> Diagnostic<'a> {
    pub(crate) fn new(
        inner: &'a hostc_diagnostic::Diagnostic,
        sources: &'a SourceManager,
        id: u64,
        severity: Severity,
    ) -> Self {
        Diagnostic {
            inner,
            sources,
            id,
            severity,
            location: OnceCell::new(),
            ranges: OnceCell::new(),
            fixits: OnceCell::new(),
            message: OnceCell::new(),
        }
    }

    fn resolve(&self, span: Span) -> Option<Location<'a>> {
        let (file, pos) = self.sources.resolve(span)?;
        Some(Location {
            file,
            line: pos.line,
            column: pos.column,
        })
    }

    fn range(&self, span: Span) -> Option<Range<'a>> {
        Some(Range {
            location: self.resolve(span)?,
            length: span.len(),
        })
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Identifier unique within the invocation, increasing in emission order.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Catalog name of the diagnostic, e.g. `cannot_find_in_scope`.
    pub fn name(&self) -> &'static str {
        self.inner.id.name()
    }

    /// Primary location. `None` for diagnostics not tied to source, such as
    /// command-line errors.
    pub fn location(&self) -> Option<Location<'a>> {
        *self
            .location
            .get_or_init(|| self.inner.loc.and_then(|span| self.resolve(span)))
    }

    pub fn ranges(&self) -> &[Range<'a>] {
        self.ranges
            .get_or_init(|| self.inner.ranges.iter().filter_map(|&span| self.range(span)).collect())
    }

    pub fn fixits(&self) -> &[FixIt<'a>] {
        self.fixits.get_or_init(|| {
            self.inner
                .fixits
                .iter()
                .filter_map(|fixit| {
                    Some(FixIt {
                        range: self.range(fixit.span)?,
                        replacement: fixit.replacement.as_str(),
                    })
                })
                .collect()
        })
    }

    /// The message rendered with the default quoting.
    pub fn message(&self) -> &str {
        self.message
            .get_or_init(|| self.inner.render(&FormatOptions::default()))
    }

    /// The format string with `%N` placeholders.
    pub fn format_string(&self) -> &'static str {
        self.inner.format_string()
    }

    /// Render this diagnostic's arguments into `format`.
    pub fn message_with_format_string(&self, format: &str) -> String {
        self.inner.render_with_format(format, &FormatOptions::default())
    }

    /// Render the message with custom quoting and type decoration.
    pub fn message_with_options(&self, options: &FormatOptions) -> String {
        self.inner.render(options)
    }
}

impl fmt::Debug for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("id", &self.id)
            .field("severity", &self.severity)
            .field("name", &self.name())
            .field("location", &self.location())
            .field("message", &self.message())
            .finish_non_exhaustive()
    }
}
