use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Silent(#[allow(dead_code, reason = "held for its Drop")] DropCounter);

impl crate::DiagnosticHandler for Silent {
    fn handle(&mut self, _diagnostic: &crate::Diagnostic<'_>) {}
}

fn counting_observer(drops: &Arc<AtomicUsize>) -> Observer {
    Observer::new(Silent(DropCounter(Arc::clone(drops))))
}

#[test]
fn new_invocation_is_empty() {
    let invocation = Invocation::new();
    assert!(invocation.arguments().is_empty());
    assert_eq!(invocation.remapped_sources().count(), 0);
    assert!(!invocation.has_observer());
    assert_eq!(invocation.fatal_policy(), FatalPolicy::Report);
}

#[test]
fn set_arguments_replaces_whole_list() {
    let mut invocation = Invocation::new();
    invocation.set_arguments(["-typecheck", "a.swift", "b.swift"]);
    invocation.set_arguments(vec!["-parse".to_string()]);
    assert_eq!(invocation.arguments(), &["-parse".to_string()]);
    invocation.set_arguments(Vec::<String>::new());
    assert!(invocation.arguments().is_empty());
}

#[test]
fn remapped_source_last_write_wins() {
    let mut invocation = Invocation::new();
    invocation.add_remapped_source("a.swift", "first");
    invocation.add_remapped_source("b.swift", String::from("other"));
    invocation.add_remapped_source("a.swift", "second");
    assert_eq!(invocation.remapped_source("a.swift"), Some("second"));
    assert_eq!(invocation.remapped_source("c.swift"), None);
    assert_eq!(invocation.remapped_sources().count(), 2);
}

#[test]
fn contents_are_copied() {
    let mut invocation = Invocation::new();
    {
        let buffer = String::from("let a = 1");
        invocation.add_remapped_source("a.swift", buffer.as_str());
    }
    assert_eq!(invocation.remapped_source("a.swift"), Some("let a = 1"));
}

#[test]
fn replacing_observer_drops_previous() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut invocation = Invocation::new();
    invocation.set_observer(Some(counting_observer(&drops)));
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    invocation.set_observer(Some(counting_observer(&drops)));
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    invocation.clear_observer();
    assert_eq!(drops.load(Ordering::SeqCst), 2);
    assert!(!invocation.has_observer());
}

#[test]
fn dispose_releases_observer_once() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut invocation = Invocation::new();
    invocation.set_observer(Some(counting_observer(&drops)));
    invocation.add_remapped_source("a.swift", "x");
    invocation.dispose();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn dispose_releases_buffers() {
    let buffer: Arc<str> = Arc::from("let a = 1");
    let mut invocation = Invocation::new();
    invocation.add_remapped_source("a.swift", Arc::clone(&buffer));
    assert_eq!(Arc::strong_count(&buffer), 2);
    invocation.dispose();
    assert_eq!(Arc::strong_count(&buffer), 1);
}
