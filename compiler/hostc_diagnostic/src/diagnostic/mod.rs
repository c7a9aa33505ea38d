//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`], [`DiagnosticKind`], and [`FixIt`], the building
//! blocks every engine phase uses to report errors, warnings, remarks and
//! notes.

use std::fmt;

use hostc_source::Span;
use smallvec::SmallVec;

use crate::format::{render, FormatOptions};
use crate::{DiagId, DiagnosticArgument};

/// Kind of a diagnostic as the engine sees it.
///
/// `Bug` is the engine's own "impossible state" channel. It never reaches a
/// host as an ordinary diagnostic; whoever consumes it decides whether the
/// process survives.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    Error,
    Warning,
    Remark,
    Note,
    Bug,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => write!(f, "error"),
            DiagnosticKind::Warning => write!(f, "warning"),
            DiagnosticKind::Remark => write!(f, "remark"),
            DiagnosticKind::Note => write!(f, "note"),
            DiagnosticKind::Bug => write!(f, "internal error"),
        }
    }
}

/// A suggested replacement of the text in `span`.
///
/// An empty replacement deletes the span; an empty span inserts.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FixIt {
    pub span: Span,
    pub replacement: String,
}

impl FixIt {
    /// Create a new fix-it.
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        FixIt {
            span,
            replacement: replacement.into(),
        }
    }

    /// A fix-it that removes `span`.
    pub fn delete(span: Span) -> Self {
        FixIt::new(span, String::new())
    }
}

/// One diagnostic emission.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be emitted through a DiagnosticEngine, not silently dropped"]
pub struct Diagnostic {
    /// Catalog entry this diagnostic was built from.
    pub id: DiagId,
    /// Kind after any engine policy (e.g. warnings-as-errors) was applied.
    pub kind: DiagnosticKind,
    /// Primary location, if the diagnostic has one.
    pub loc: Option<Span>,
    /// Additional highlighted ranges.
    pub ranges: SmallVec<[Span; 2]>,
    /// Suggested edits.
    pub fixits: SmallVec<[FixIt; 1]>,
    /// Arguments substituted into the catalog format string.
    pub args: SmallVec<[DiagnosticArgument; 2]>,
    /// Notes emitted right after this diagnostic.
    pub notes: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a diagnostic for a catalog entry with its default kind.
    pub fn new(id: DiagId) -> Self {
        Diagnostic {
            id,
            kind: id.kind(),
            loc: None,
            ranges: SmallVec::new(),
            fixits: SmallVec::new(),
            args: SmallVec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the primary location.
    pub fn at(mut self, span: Span) -> Self {
        self.loc = Some(span);
        self
    }

    /// Append a format argument.
    pub fn with_arg(mut self, arg: impl Into<DiagnosticArgument>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add a highlighted range.
    pub fn with_range(mut self, span: Span) -> Self {
        self.ranges.push(span);
        self
    }

    /// Add a fix-it replacing `span` with `replacement`.
    pub fn with_fixit(mut self, span: Span, replacement: impl Into<String>) -> Self {
        self.fixits.push(FixIt::new(span, replacement));
        self
    }

    /// Attach a child note.
    pub fn with_note(mut self, note: Diagnostic) -> Self {
        self.notes.push(note);
        self
    }

    /// The catalog format string, with `%N` placeholders.
    pub fn format_string(&self) -> &'static str {
        self.id.format()
    }

    /// Render the message with the given formatting options.
    pub fn render(&self, options: &FormatOptions) -> String {
        render(self.format_string(), &self.args, options)
    }

    /// Render the arguments into a caller-supplied format string.
    pub fn render_with_format(&self, format: &str, options: &FormatOptions) -> String {
        render(format, &self.args, options)
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.kind,
            self.id.name(),
            self.render(&FormatOptions::default())
        )?;
        if let Some(loc) = self.loc {
            write!(f, "\n  --> {loc:?}")?;
        }
        for range in &self.ranges {
            write!(f, "\n      {range:?}")?;
        }
        for fixit in &self.fixits {
            write!(f, "\n  = fix-it: {:?} -> {:?}", fixit.span, fixit.replacement)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {}", note.render(&FormatOptions::default()))?;
        }
        Ok(())
    }
}
