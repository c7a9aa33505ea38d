//! Severity policy and bookkeeping between the engine phases and a
//! [`DiagnosticConsumer`].

use hostc_source::SourceManager;
use tracing::trace;

use crate::{Diagnostic, DiagnosticConsumer, DiagnosticKind, ErrorGuaranteed};

/// Per-run severity adjustments, set from command-line options.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticPolicy {
    /// Promote warnings to errors.
    pub warnings_as_errors: bool,
    /// Drop warnings (and their notes). Wins over `warnings_as_errors`.
    pub suppress_warnings: bool,
    /// Drop remarks (and their notes).
    pub suppress_remarks: bool,
}

/// Routes diagnostics to a consumer.
///
/// Notes attached with [`Diagnostic::with_note`] are delivered as separate
/// emissions directly after their parent. A parent dropped by the policy
/// takes its notes with it. `Bug` diagnostics are never transformed or
/// dropped.
pub struct DiagnosticEngine<'a> {
    consumer: &'a mut dyn DiagnosticConsumer,
    policy: DiagnosticPolicy,
    error_count: usize,
    warning_count: usize,
    emitted: usize,
    had_bug: bool,
}

impl<'a> DiagnosticEngine<'a> {
    pub fn new(consumer: &'a mut dyn DiagnosticConsumer, policy: DiagnosticPolicy) -> Self {
        DiagnosticEngine {
            consumer,
            policy,
            error_count: 0,
            warning_count: 0,
            emitted: 0,
            had_bug: false,
        }
    }

    pub fn policy(&self) -> DiagnosticPolicy {
        self.policy
    }

    /// Apply the policy to `diagnostic` and forward what survives.
    pub fn emit(&mut self, sources: &SourceManager, mut diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::Warning if self.policy.suppress_warnings => {
                trace!(id = %diagnostic.id, "warning suppressed");
                return;
            }
            DiagnosticKind::Warning if self.policy.warnings_as_errors => {
                diagnostic.kind = DiagnosticKind::Error;
            }
            DiagnosticKind::Remark if self.policy.suppress_remarks => {
                trace!(id = %diagnostic.id, "remark suppressed");
                return;
            }
            _ => {}
        }

        match diagnostic.kind {
            DiagnosticKind::Error => self.error_count += 1,
            DiagnosticKind::Warning => self.warning_count += 1,
            DiagnosticKind::Bug => self.had_bug = true,
            DiagnosticKind::Remark | DiagnosticKind::Note => {}
        }

        let notes = std::mem::take(&mut diagnostic.notes);
        self.forward(sources, &diagnostic);
        for note in notes {
            self.forward_note(sources, note);
        }
    }

    /// Emit an error and return proof that it was reported.
    pub fn emit_error(&mut self, sources: &SourceManager, mut diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error(), "emit_error called with {}", diagnostic.kind);
        diagnostic.kind = DiagnosticKind::Error;
        self.emit(sources, diagnostic);
        ErrorGuaranteed::new()
    }

    fn forward_note(&mut self, sources: &SourceManager, mut note: Diagnostic) {
        let nested = std::mem::take(&mut note.notes);
        self.forward(sources, &note);
        for child in nested {
            self.forward_note(sources, child);
        }
    }

    fn forward(&mut self, sources: &SourceManager, diagnostic: &Diagnostic) {
        self.emitted += 1;
        trace!(id = %diagnostic.id, kind = %diagnostic.kind, "emit");
        self.consumer.handle_diagnostic(sources, diagnostic);
    }

    /// Tell the consumer the run is over.
    pub fn finish(&mut self) {
        self.consumer.finish_processing();
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Number of emissions delivered, notes included.
    pub fn emitted_count(&self) -> usize {
        self.emitted
    }

    pub fn had_bug(&self) -> bool {
        self.had_bug
    }

    /// Proof of errors, if any were emitted.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }
}
