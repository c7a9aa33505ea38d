use std::sync::Arc;

use hostc_invoke::{initialize, invoke, Invocation, Observer};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;

/// Run `source` as `a.swift` and print every diagnostic through one emitter.
fn emit_all(source: &str, mode: ColorMode) -> (String, usize, usize) {
    initialize();
    let emitter = Arc::new(Mutex::new(TerminalEmitter::with_color_mode(
        Vec::new(),
        mode,
        false,
    )));
    let sink = Arc::clone(&emitter);
    let mut invocation = Invocation::new();
    invocation.set_arguments(["-typecheck", "a.swift"]);
    invocation.add_remapped_source("a.swift", source);
    invocation.set_observer(Some(Observer::new(move |diag: &Diagnostic<'_>| {
        sink.lock().emit(diag);
    })));
    invoke(&mut invocation).unwrap();
    invocation.dispose();

    let mut emitter = emitter.lock();
    emitter.emit_summary();
    let text = String::from_utf8(emitter.writer.clone()).unwrap();
    (text, emitter.error_count(), emitter.warning_count())
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn error_with_note_and_fixit() {
    let (text, errors, warnings) = emit_all("let count = 1\nprint(coutn)\n", ColorMode::Never);
    assert_eq!(
        text,
        "a.swift:2:7: error[cannot_find_in_scope]: cannot find 'coutn' in scope\n\
         \x20 --> a.swift:2:7 (5 bytes)\n\
         a.swift:2:7: note[did_you_mean]: did you mean 'count'?\n\
         \x20 = fix-it: replace 5 bytes at 2:7 with \"count\"\n\
         error: aborting due to previous error\n"
    );
    assert_eq!((errors, warnings), (1, 0));
}

#[test]
fn ranges_are_listed() {
    let (text, _, _) = emit_all("let x = 1 + \"one\"\n", ColorMode::Never);
    assert!(text.contains("  --> a.swift:1:9 (1 byte)\n"), "{text}");
    assert!(text.contains("  --> a.swift:1:13 (5 bytes)\n"), "{text}");
}

#[test]
fn warnings_only_summary() {
    let (text, errors, warnings) = emit_all("var total = 1\nprint(total)\n", ColorMode::Never);
    assert_eq!((errors, warnings), (0, 1));
    assert!(text.ends_with("warning: 1 warning emitted\n"), "{text}");
}

#[test]
fn clean_source_prints_nothing() {
    let (text, _, _) = emit_all("let a = 1\nprint(a)\n", ColorMode::Never);
    assert_eq!(text, "");
}

#[test]
fn colors_wrap_severity() {
    let (text, _, _) = emit_all("print(missing)\n", ColorMode::Always);
    assert!(text.contains("\x1b[1;31merror\x1b[0m"));
    assert!(text.contains("cannot find 'missing' in scope"));
}
