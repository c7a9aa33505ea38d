use std::sync::Arc;

use hostc_diagnostic::{DiagId, DiagnosticConsumer};
use hostc_source::SourceManager;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;

fn recording_observer() -> (Observer, Arc<Mutex<Vec<(u64, Severity)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer = Observer::new(move |diag: &Diagnostic<'_>| {
        sink.lock().push((diag.id(), diag.severity()));
    });
    (observer, seen)
}

fn recorded(seen: &Mutex<Vec<(u64, Severity)>>) -> Vec<(u64, Severity)> {
    seen.lock().clone()
}

#[test]
fn ids_start_at_one_and_increase() {
    let sources = SourceManager::new();
    let (mut observer, seen) = recording_observer();
    let mut adapter = ObserverAdapter::new(Some(&mut observer), FatalPolicy::Report);
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::NoInputFiles));
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::DidYouMean));
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::SourceLoaded));
    assert_eq!(adapter.forwarded(), 3);
    assert!(adapter.into_fatal().is_none());
    assert_eq!(
        recorded(&seen),
        vec![(1, Severity::Error), (2, Severity::Note), (3, Severity::Remark)]
    );
}

#[test]
fn without_observer_diagnostics_are_consumed() {
    let sources = SourceManager::new();
    let mut adapter = ObserverAdapter::new(None, FatalPolicy::Report);
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::NoInputFiles));
    assert_eq!(adapter.forwarded(), 0);
}

#[test]
fn bug_under_report_policy_stops_forwarding() {
    let sources = SourceManager::new();
    let (mut observer, seen) = recording_observer();
    let mut adapter = ObserverAdapter::new(Some(&mut observer), FatalPolicy::Report);
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::NoInputFiles));
    adapter.handle_diagnostic(
        &sources,
        &hostc_diagnostic::Diagnostic::new(DiagId::InvariantViolation)
            .with_arg(hostc_diagnostic::DiagnosticArgument::string("boom")),
    );
    adapter.handle_diagnostic(&sources, &hostc_diagnostic::Diagnostic::new(DiagId::ExpectedType));
    assert_eq!(adapter.forwarded(), 1);
    assert_eq!(
        adapter.into_fatal().as_deref(),
        Some("compiler invariant violated: boom")
    );
    assert_eq!(recorded(&seen), vec![(1, Severity::Error)]);
}
