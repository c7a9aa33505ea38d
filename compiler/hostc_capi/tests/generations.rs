//! Both API generations linked into one process, used back to back.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};
use std::ptr;

use hostc_capi::v0::{
    hostc_v0_delegate_create, hostc_v0_delegate_dispose, hostc_v0_delegate_set_diagnostic_handler,
    hostc_v0_diagnostic_get_message, hostc_v0_invocation_add_source_buffer,
    hostc_v0_invocation_create, hostc_v0_invocation_dispose,
    hostc_v0_invocation_set_frontend_arguments, hostc_v0_invoke_frontend, HostcV0Diagnostic,
};
use hostc_capi::v1::{
    hostc_v1_diagnostic_get_id, hostc_v1_diagnostic_get_message, hostc_v1_initialize,
    hostc_v1_invocation_add_remapped_source, hostc_v1_invocation_create,
    hostc_v1_invocation_dispose, hostc_v1_invocation_set_arguments,
    hostc_v1_invocation_set_observer, hostc_v1_invoke, HostcV1Diagnostic,
};
use pretty_assertions::assert_eq;

thread_local! {
    static V0_MESSAGES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn text(ptr: *const c_char) -> String {
    // SAFETY: accessor strings are NUL-terminated and live until the handler returns
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

extern "C" fn v0_collect(diagnostic: *const HostcV0Diagnostic) {
    let message = text(hostc_v0_diagnostic_get_message(diagnostic));
    V0_MESSAGES.with(|messages| messages.borrow_mut().push(message));
}

extern "C" fn v1_collect(diagnostic: *const HostcV1Diagnostic, context: *mut c_void) {
    // SAFETY: the tests register a `Vec<(u64, String)>` as the context
    let seen = unsafe { &mut *context.cast::<Vec<(u64, String)>>() };
    seen.push((
        hostc_v1_diagnostic_get_id(diagnostic),
        text(hostc_v1_diagnostic_get_message(diagnostic)),
    ));
}

fn v1_run(source: &str) -> (i32, Vec<(u64, String)>) {
    hostc_v1_initialize();
    let invocation = hostc_v1_invocation_create();
    let argv = [c"-typecheck".as_ptr(), c"main.swift".as_ptr()];
    hostc_v1_invocation_set_arguments(invocation, argv.len(), argv.as_ptr());
    hostc_v1_invocation_add_remapped_source(
        invocation,
        c"main.swift".as_ptr(),
        source.as_ptr().cast(),
        source.len(),
    );
    let mut seen: Vec<(u64, String)> = Vec::new();
    hostc_v1_invocation_set_observer(
        invocation,
        Some(v1_collect),
        ptr::from_mut(&mut seen).cast(),
        None,
    );
    let status = hostc_v1_invoke(invocation);
    hostc_v1_invocation_dispose(invocation);
    (status, seen)
}

fn v0_run(source: &str) -> (i32, Vec<String>) {
    V0_MESSAGES.with(|messages| messages.borrow_mut().clear());
    let invocation = hostc_v0_invocation_create();
    let argv = [c"-typecheck".as_ptr(), c"main.swift".as_ptr()];
    hostc_v0_invocation_set_frontend_arguments(invocation, argv.len(), argv.as_ptr());
    hostc_v0_invocation_add_source_buffer(
        invocation,
        c"main.swift".as_ptr(),
        source.as_ptr().cast(),
        source.len(),
    );
    let delegate = hostc_v0_delegate_create();
    hostc_v0_delegate_set_diagnostic_handler(delegate, Some(v0_collect));
    let status = hostc_v0_invoke_frontend(invocation, delegate);
    hostc_v0_delegate_dispose(delegate);
    hostc_v0_invocation_dispose(invocation);
    (status, V0_MESSAGES.with(|messages| messages.borrow().clone()))
}

#[test]
fn generations_agree_on_messages() {
    let source = "print(undeclaredThing)\n";
    let (v0_status, v0_messages) = v0_run(source);
    let (v1_status, v1_seen) = v1_run(source);

    assert_eq!(v0_status, v1_status);
    let v1_messages: Vec<String> = v1_seen.into_iter().map(|(_, message)| message).collect();
    assert_eq!(v0_messages, v1_messages);
}

#[test]
fn sequential_invocations_are_independent() {
    let (first_status, first) = v1_run("let a = 1\na = 2\n");
    let (second_status, second) = v1_run("print(1)\n");
    let (third_status, third) = v1_run("print(b)\n");

    assert_eq!(first_status, 1);
    assert_eq!(
        first,
        vec![
            (1, "cannot assign to value: 'a' is a 'let' constant".to_string()),
            (2, "change 'let' to 'var' to make it mutable".to_string()),
        ]
    );
    assert_eq!((second_status, second), (0, Vec::new()));
    assert_eq!(third_status, 1);
    assert_eq!(third, vec![(1, "cannot find 'b' in scope".to_string())]);
}
