//! Observer/handler binding.
//!
//! A handler is called synchronously, once per diagnostic, only from inside
//! an [`invoke`](crate::invoke) call, and never concurrently with itself.
//! Whatever context the handler needs is captured by it; releasing that
//! context is the handler's `Drop`, which runs when the observer is
//! replaced or its invocation is disposed.

use std::fmt;

use crate::Diagnostic;

/// Receives diagnostics during an invocation.
pub trait DiagnosticHandler: Send {
    fn handle(&mut self, diagnostic: &Diagnostic<'_>);
}

impl<F> DiagnosticHandler for F
where
    F: FnMut(&Diagnostic<'_>) + Send,
{
    fn handle(&mut self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic);
    }
}

/// A registered handler.
pub struct Observer {
    handler: Box<dyn DiagnosticHandler>,
}

impl Observer {
    pub fn new(handler: impl DiagnosticHandler + 'static) -> Self {
        Observer {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn notify(&mut self, diagnostic: &Diagnostic<'_>) {
        self.handler.handle(diagnostic);
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}
