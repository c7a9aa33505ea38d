//! Tests for the generation-1 C surface, driven through the exported
//! functions the way a C host would call them.

use std::ffi::{c_char, c_int, c_void, CStr};
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Seen {
    id: u64,
    severity: HostcV1Severity,
    name: String,
    file: Option<String>,
    line: u32,
    column: u32,
    message: String,
    fixits: Vec<(u32, u32, u32, String)>,
}

fn text(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: accessor strings are NUL-terminated and live until the handler returns
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

fn read(diagnostic: *const HostcV1Diagnostic) -> Seen {
    let location = hostc_v1_diagnostic_get_location(diagnostic);
    let mut count = 0usize;
    let fixits = hostc_v1_diagnostic_get_fixits(diagnostic, &mut count);
    let fixits = if fixits.is_null() {
        Vec::new()
    } else {
        // SAFETY: the accessor returned `count` fix-its owned by the record
        unsafe { std::slice::from_raw_parts(fixits, count) }
            .iter()
            .map(|fixit| {
                (
                    fixit.range.location.line,
                    fixit.range.location.column,
                    fixit.range.length,
                    text(fixit.replacement).unwrap_or_default(),
                )
            })
            .collect()
    };
    Seen {
        id: hostc_v1_diagnostic_get_id(diagnostic),
        severity: hostc_v1_diagnostic_get_severity(diagnostic),
        name: text(hostc_v1_diagnostic_get_name(diagnostic)).unwrap_or_default(),
        file: text(location.file),
        line: location.line,
        column: location.column,
        message: text(hostc_v1_diagnostic_get_message(diagnostic)).unwrap_or_default(),
        fixits,
    }
}

extern "C" fn collect(diagnostic: *const HostcV1Diagnostic, context: *mut c_void) {
    // SAFETY: tests register a `Vec<Seen>` as the context
    let seen = unsafe { &mut *context.cast::<Vec<Seen>>() };
    seen.push(read(diagnostic));
}

fn invocation(args: &[&CStr], sources: &[(&CStr, &str)]) -> *mut HostcV1Invocation {
    hostc_v1_initialize();
    let invocation = hostc_v1_invocation_create();
    let argv: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
    hostc_v1_invocation_set_arguments(invocation, argv.len(), argv.as_ptr());
    for (path, contents) in sources {
        hostc_v1_invocation_add_remapped_source(
            invocation,
            path.as_ptr(),
            contents.as_ptr().cast(),
            contents.len(),
        );
    }
    invocation
}

fn run(args: &[&CStr], sources: &[(&CStr, &str)]) -> (c_int, Vec<Seen>) {
    let invocation = invocation(args, sources);
    let mut seen: Vec<Seen> = Vec::new();
    hostc_v1_invocation_set_observer(
        invocation,
        Some(collect),
        ptr::from_mut(&mut seen).cast(),
        None,
    );
    let status = hostc_v1_invoke(invocation);
    hostc_v1_invocation_dispose(invocation);
    (status, seen)
}

// ── Versioning ──────────────────────────────────────────────────────────

#[test]
fn version_is_one_zero() {
    assert_eq!(hostc_v1_version_major(), 1);
    assert_eq!(hostc_v1_version_minor(), 0);
    assert!(VERSION.is_compatible_with(ApiVersion::new(1, 0)));
    assert!(!VERSION.is_compatible_with(ApiVersion::new(0, 1)));
}

#[test]
fn severity_order_is_error_warning_note_remark() {
    assert_eq!(HostcV1Severity::Error as c_int, 0);
    assert_eq!(HostcV1Severity::Warning as c_int, 1);
    assert_eq!(HostcV1Severity::Note as c_int, 2);
    assert_eq!(HostcV1Severity::Remark as c_int, 3);
}

// ── Invocation ──────────────────────────────────────────────────────────

#[test]
fn undeclared_identifier_is_reported_once() {
    let (status, seen) = run(
        &[c"-typecheck", c"input.swift"],
        &[(c"input.swift", "print(undeclaredThing)\n")],
    );
    assert_eq!(status, 1);
    assert_eq!(
        seen,
        vec![Seen {
            id: 1,
            severity: HostcV1Severity::Error,
            name: "cannot_find_in_scope".to_string(),
            file: Some("input.swift".to_string()),
            line: 1,
            column: 7,
            message: "cannot find 'undeclaredThing' in scope".to_string(),
            fixits: Vec::new(),
        }]
    );
}

#[test]
fn empty_arguments_report_nothing() {
    let (status, seen) = run(&[], &[]);
    assert_eq!(status, 0);
    assert!(seen.is_empty());
}

#[test]
fn later_buffer_for_a_path_wins() {
    let (status, seen) = run(
        &[c"-typecheck", c"a.swift"],
        &[(c"a.swift", "print(missing)\n"), (c"a.swift", "print(1)\n")],
    );
    assert_eq!(status, 0);
    assert!(seen.is_empty());
}

#[test]
fn fixit_is_translated_to_line_and_column() {
    let (status, seen) = run(
        &[c"-typecheck", c"a.swift"],
        &[(c"a.swift", "let count = 1\nprint(coutn)\n")],
    );
    assert_eq!(status, 1);
    let severities: Vec<_> = seen.iter().map(|s| s.severity).collect();
    assert_eq!(severities, [HostcV1Severity::Error, HostcV1Severity::Note]);
    assert_eq!(seen[1].fixits, vec![(2, 7, 5, "count".to_string())]);
    assert!(seen[0].id < seen[1].id);
}

#[test]
fn remark_uses_its_own_severity() {
    let (status, seen) = run(
        &[c"-typecheck", c"-Rsource-loading", c"a.swift"],
        &[(c"a.swift", "let a = 1\nprint(a)\n")],
    );
    assert_eq!(status, 0);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].severity, HostcV1Severity::Remark);
    assert_eq!(seen[0].name, "source_loaded");
}

// ── Accessors ───────────────────────────────────────────────────────────

extern "C" fn check_idempotent(diagnostic: *const HostcV1Diagnostic, context: *mut c_void) {
    let mut first = 0usize;
    let mut second = 0usize;
    let same = hostc_v1_diagnostic_get_message(diagnostic)
        == hostc_v1_diagnostic_get_message(diagnostic)
        && hostc_v1_diagnostic_get_format_string(diagnostic)
            == hostc_v1_diagnostic_get_format_string(diagnostic)
        && hostc_v1_diagnostic_get_location(diagnostic).file
            == hostc_v1_diagnostic_get_location(diagnostic).file
        && hostc_v1_diagnostic_get_ranges(diagnostic, &mut first)
            == hostc_v1_diagnostic_get_ranges(diagnostic, &mut second)
        && first == second;
    // SAFETY: the test registers a `Vec<bool>` as the context
    let checks = unsafe { &mut *context.cast::<Vec<bool>>() };
    checks.push(same);
}

#[test]
fn accessors_return_the_same_pointers() {
    let invocation = invocation(
        &[c"-typecheck", c"a.swift"],
        &[(c"a.swift", "let count = 1\nprint(coutn)\n")],
    );
    let mut checks: Vec<bool> = Vec::new();
    hostc_v1_invocation_set_observer(
        invocation,
        Some(check_idempotent),
        ptr::from_mut(&mut checks).cast(),
        None,
    );
    hostc_v1_invoke(invocation);
    hostc_v1_invocation_dispose(invocation);
    assert_eq!(checks, [true, true]);
}

#[derive(Default)]
struct Rendered {
    format: Option<String>,
    custom: Option<String>,
    with_options: Option<String>,
    with_defaults: Option<String>,
}

extern "C" fn render(diagnostic: *const HostcV1Diagnostic, context: *mut c_void) {
    // SAFETY: the test registers a `Rendered` as the context
    let rendered = unsafe { &mut *context.cast::<Rendered>() };
    let options = HostcV1FormatOptions {
        opening_quote: c"`".as_ptr(),
        closing_quote: c"`".as_ptr(),
        aka_format: c"".as_ptr(),
        opaque_result_format: ptr::null(),
    };
    rendered.format = text(hostc_v1_diagnostic_get_format_string(diagnostic));
    rendered.custom = text(hostc_v1_diagnostic_get_message_with_custom_format_string(
        diagnostic,
        c"%1 <- %0".as_ptr(),
    ));
    rendered.with_options =
        text(hostc_v1_diagnostic_get_message_with_options(diagnostic, &options));
    rendered.with_defaults =
        text(hostc_v1_diagnostic_get_message_with_options(diagnostic, ptr::null()));
}

#[test]
fn messages_render_with_host_formatting() {
    let invocation = invocation(
        &[c"-typecheck", c"a.swift"],
        &[(c"a.swift", "typealias Meters = Int\nlet d: Meters = \"far\"\n")],
    );
    let mut rendered = Rendered::default();
    hostc_v1_invocation_set_observer(
        invocation,
        Some(render),
        ptr::from_mut(&mut rendered).cast(),
        None,
    );
    assert_eq!(hostc_v1_invoke(invocation), 1);
    hostc_v1_invocation_dispose(invocation);

    assert_eq!(
        rendered.format.as_deref(),
        Some("cannot convert value of type %0 to specified type %1")
    );
    assert_eq!(rendered.custom.as_deref(), Some("'Meters' (aka 'Int') <- 'String'"));
    assert_eq!(
        rendered.with_options.as_deref(),
        Some("cannot convert value of type `String` to specified type `Meters`")
    );
    assert_eq!(
        rendered.with_defaults.as_deref(),
        Some("cannot convert value of type 'String' to specified type 'Meters' (aka 'Int')")
    );
}

#[test]
fn null_handles_are_tolerated() {
    let mut count = 9usize;
    assert!(hostc_v1_diagnostic_get_message(ptr::null()).is_null());
    assert!(hostc_v1_diagnostic_get_ranges(ptr::null(), &mut count).is_null());
    assert_eq!(count, 0);
    assert_eq!(hostc_v1_diagnostic_get_id(ptr::null()), 0);
    assert!(hostc_v1_diagnostic_get_location(ptr::null()).file.is_null());
    hostc_v1_invocation_set_arguments(ptr::null_mut(), 0, ptr::null());
    hostc_v1_invocation_dispose(ptr::null_mut());
    assert_eq!(hostc_v1_invoke(ptr::null_mut()), HOSTC_STATUS_ENGINE_FATAL);
}

// ── Observer context disposal ───────────────────────────────────────────

extern "C" fn ignore(_diagnostic: *const HostcV1Diagnostic, _context: *mut c_void) {}

extern "C" fn count_dispose(context: *mut c_void) {
    // SAFETY: the tests register an `AtomicUsize` as the context
    let disposed = unsafe { &*context.cast::<AtomicUsize>() };
    disposed.fetch_add(1, Ordering::SeqCst);
}

fn counter_context(counter: &AtomicUsize) -> *mut c_void {
    ptr::from_ref(counter).cast_mut().cast()
}

#[test]
fn replaced_observer_is_disposed_once() {
    let first = AtomicUsize::new(0);
    let second = AtomicUsize::new(0);
    let invocation = invocation(&[], &[]);

    hostc_v1_invocation_set_observer(
        invocation,
        Some(ignore),
        counter_context(&first),
        Some(count_dispose),
    );
    hostc_v1_invocation_set_observer(
        invocation,
        Some(ignore),
        counter_context(&second),
        Some(count_dispose),
    );
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);

    assert_eq!(hostc_v1_invoke(invocation), 0);
    assert_eq!(second.load(Ordering::SeqCst), 0);

    hostc_v1_invocation_dispose(invocation);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn null_handler_clears_and_disposes_observer() {
    let disposed = AtomicUsize::new(0);
    let invocation = invocation(&[], &[]);
    hostc_v1_invocation_set_observer(
        invocation,
        Some(ignore),
        counter_context(&disposed),
        Some(count_dispose),
    );
    hostc_v1_invocation_set_observer(invocation, None, ptr::null_mut(), None);
    assert_eq!(disposed.load(Ordering::SeqCst), 1);
    hostc_v1_invocation_dispose(invocation);
    assert_eq!(disposed.load(Ordering::SeqCst), 1);
}

// ── Fatal and precondition paths ────────────────────────────────────────

#[test]
fn engine_fatal_is_reported_under_report_policy() {
    let invocation = invocation(&[c"-debug-assert-immediately"], &[]);
    hostc_v1_invocation_set_fatal_policy(invocation, HOSTC_V1_FATAL_POLICY_REPORT);
    let mut seen: Vec<Seen> = Vec::new();
    hostc_v1_invocation_set_observer(
        invocation,
        Some(collect),
        ptr::from_mut(&mut seen).cast(),
        None,
    );
    assert_eq!(hostc_v1_invoke(invocation), HOSTC_STATUS_ENGINE_FATAL);
    hostc_v1_invocation_dispose(invocation);
    assert!(seen.is_empty());
}

struct Nested {
    invocation: *mut HostcV1Invocation,
    status: Option<c_int>,
}

extern "C" fn invoke_again(_diagnostic: *const HostcV1Diagnostic, context: *mut c_void) {
    // SAFETY: the test registers a `Nested` as the context
    let nested = unsafe { &mut *context.cast::<Nested>() };
    nested.status = Some(hostc_v1_invoke(nested.invocation));
}

#[test]
fn reentrant_invoke_returns_fatal_status() {
    let outer = invocation(
        &[c"-typecheck", c"a.swift"],
        &[(c"a.swift", "print(undeclaredThing)\n")],
    );
    let mut nested = Nested {
        invocation: invocation(&[], &[]),
        status: None,
    };
    hostc_v1_invocation_set_observer(
        outer,
        Some(invoke_again),
        ptr::from_mut(&mut nested).cast(),
        None,
    );
    assert_eq!(hostc_v1_invoke(outer), 1);
    assert_eq!(nested.status, Some(HOSTC_STATUS_ENGINE_FATAL));
    hostc_v1_invocation_dispose(nested.invocation);
    hostc_v1_invocation_dispose(outer);
}
