//! The consumer the driver installs on the engine.
//!
//! Numbers every emission, translates it into a [`Diagnostic`] view and
//! hands it to the observer. Engine `Bug` diagnostics are routed to the
//! invocation's [`FatalPolicy`] instead.

use hostc_diagnostic::{DiagnosticConsumer, FormatOptions};
use hostc_source::SourceManager;
use tracing::{error, trace, warn};

use crate::{Diagnostic, FatalPolicy, Observer, Severity};

pub(crate) struct ObserverAdapter<'o> {
    observer: Option<&'o mut Observer>,
    policy: FatalPolicy,
    next_id: u64,
    forwarded: usize,
    fatal: Option<String>,
}

impl<'o> ObserverAdapter<'o> {
    pub(crate) fn new(observer: Option<&'o mut Observer>, policy: FatalPolicy) -> Self {
        ObserverAdapter {
            observer,
            policy,
            next_id: 1,
            forwarded: 0,
            fatal: None,
        }
    }

    /// Number of diagnostics delivered to the observer.
    pub(crate) fn forwarded(&self) -> usize {
        self.forwarded
    }

    /// The engine-fatal message, if the run hit one under `Report`.
    pub(crate) fn into_fatal(self) -> Option<String> {
        self.fatal
    }

    fn engine_fatal(&mut self, diagnostic: &hostc_diagnostic::Diagnostic) {
        let message = diagnostic.render(&FormatOptions::default());
        match self.policy {
            FatalPolicy::Abort => {
                error!(%message, "engine invariant violated; aborting");
                std::process::abort();
            }
            FatalPolicy::Report => {
                warn!(%message, "engine invariant violated; reporting fatal status");
                self.fatal = Some(message);
            }
        }
    }
}

impl DiagnosticConsumer for ObserverAdapter<'_> {
    fn handle_diagnostic(&mut self, sources: &SourceManager, diagnostic: &hostc_diagnostic::Diagnostic) {
        if self.fatal.is_some() {
            trace!(id = %diagnostic.id, "dropped after engine fatal");
            return;
        }
        let Some(severity) = Severity::from_kind(diagnostic.kind) else {
            self.engine_fatal(diagnostic);
            return;
        };

        let id = self.next_id;
        self.next_id += 1;

        let Some(observer) = self.observer.as_deref_mut() else {
            trace!(id, "no observer; diagnostic consumed");
            return;
        };
        let view = Diagnostic::new(diagnostic, sources, id, severity);
        trace!(id, %severity, name = view.name(), "forwarding diagnostic");
        observer.notify(&view);
        self.forwarded += 1;
    }
}

#[cfg(test)]
mod tests;
