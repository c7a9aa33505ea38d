//! Sinks the diagnostic engine reports into.
//!
//! A consumer sees each emission exactly once, in emission order, with its
//! notes already flattened into separate calls. The `&Diagnostic` passed to
//! [`DiagnosticConsumer::handle_diagnostic`] is only borrowed for the
//! duration of the call.

use hostc_source::SourceManager;

use crate::Diagnostic;

/// Receiver of diagnostic emissions.
pub trait DiagnosticConsumer {
    /// Handle one emission. `sources` resolves the diagnostic's spans.
    fn handle_diagnostic(&mut self, sources: &SourceManager, diagnostic: &Diagnostic);

    /// Called once after the engine finished a run.
    fn finish_processing(&mut self) {}
}

impl<C: DiagnosticConsumer + ?Sized> DiagnosticConsumer for &mut C {
    fn handle_diagnostic(&mut self, sources: &SourceManager, diagnostic: &Diagnostic) {
        (**self).handle_diagnostic(sources, diagnostic);
    }

    fn finish_processing(&mut self) {
        (**self).finish_processing();
    }
}

/// Drops everything, counting what it dropped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NullConsumer {
    pub dropped: usize,
}

impl DiagnosticConsumer for NullConsumer {
    fn handle_diagnostic(&mut self, _sources: &SourceManager, _diagnostic: &Diagnostic) {
        self.dropped += 1;
    }
}

/// Keeps an owned copy of every emission. Mostly useful in tests.
#[derive(Clone, Debug, Default)]
pub struct CollectingConsumer {
    diagnostics: Vec<Diagnostic>,
    finished: bool,
}

impl CollectingConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Whether `finish_processing` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl DiagnosticConsumer for CollectingConsumer {
    fn handle_diagnostic(&mut self, _sources: &SourceManager, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn finish_processing(&mut self) {
        self.finished = true;
    }
}
