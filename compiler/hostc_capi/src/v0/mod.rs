//! Generation 0 (`hostc_v0_*`, version 0.1): the frontend-only surface.
//!
//! A delegate carries a context-free handler; the invocation carries
//! frontend arguments and source buffers. There is no explicit
//! initialization (the first `hostc_v0_invoke_frontend` performs it) and
//! engine invariant violations abort the process.
//!
//! Mirrors `include/hostc/v0.h`: `u32` line and column, `usize` counts,
//! length-delimited source buffers. Kept as its own module so hosts built
//! against it keep working while generation 1 evolves.

use std::ffi::{c_char, c_int};
use std::ptr;

use hostc_invoke::version::ApiVersion;
use hostc_invoke::{
    initialize, invoke, Diagnostic, DiagnosticHandler, FatalPolicy, FixIt, Invocation, Location,
    Observer, Range, Severity,
};
use tracing::{debug, warn};

use crate::ffi::{read_bytes, read_str, read_str_array, status_or, write_count, CStringArena};
use crate::record::{from_handle, with_handle, Generation, Record};

pub const VERSION: ApiVersion = ApiVersion::new(0, 1);

/// Returned by [`hostc_v0_invoke_frontend`] when the call itself failed
/// (NULL invocation or a panic) rather than the compilation.
const CALL_FAILED: c_int = -1;

/// Severity, in this generation's order.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostcV0Severity {
    Error = 0,
    Warning = 1,
    Remark = 2,
    Note = 3,
}

impl From<Severity> for HostcV0Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => HostcV0Severity::Error,
            Severity::Warning => HostcV0Severity::Warning,
            Severity::Remark => HostcV0Severity::Remark,
            Severity::Note => HostcV0Severity::Note,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV0Location {
    pub file: *const c_char,
    pub line: u32,
    pub column: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV0Range {
    pub location: HostcV0Location,
    pub length: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV0FixIt {
    pub range: HostcV0Range,
    pub replacement: *const c_char,
}

const NO_LOCATION: HostcV0Location = HostcV0Location {
    file: ptr::null(),
    line: 0,
    column: 0,
};

pub struct HostcV0Invocation {
    inner: Invocation,
}

pub struct HostcV0Delegate {
    handler: Option<HostcV0DiagnosticHandler>,
}

pub struct HostcV0Diagnostic {
    _opaque: [u8; 0],
}

pub type HostcV0DiagnosticHandler = extern "C" fn(diagnostic: *const HostcV0Diagnostic);

struct V0;

impl Generation for V0 {
    type Location = HostcV0Location;
    type Range = HostcV0Range;
    type FixIt = HostcV0FixIt;

    fn location(strings: &CStringArena, location: Option<Location<'_>>) -> HostcV0Location {
        location.map_or(NO_LOCATION, |location| HostcV0Location {
            file: strings.alloc(location.file),
            line: location.line,
            column: location.column,
        })
    }

    fn range(strings: &CStringArena, range: &Range<'_>) -> HostcV0Range {
        HostcV0Range {
            location: V0::location(strings, Some(range.location)),
            length: range.length,
        }
    }

    fn fixit(strings: &CStringArena, fixit: &FixIt<'_>) -> HostcV0FixIt {
        HostcV0FixIt {
            range: V0::range(strings, &fixit.range),
            replacement: strings.alloc(fixit.replacement),
        }
    }
}

struct DelegateObserver {
    handler: HostcV0DiagnosticHandler,
}

impl DiagnosticHandler for DelegateObserver {
    fn handle(&mut self, diagnostic: &Diagnostic<'_>) {
        with_handle::<V0, HostcV0Diagnostic>(diagnostic, |handle| (self.handler)(handle));
    }
}

fn invocation_mut<'a>(invocation: *mut HostcV0Invocation) -> Option<&'a mut Invocation> {
    // SAFETY: the host passes NULL or a live handle from
    // `hostc_v0_invocation_create`
    unsafe { invocation.as_mut() }.map(|handle| &mut handle.inner)
}

fn record<'r>(diagnostic: *const HostcV0Diagnostic) -> Option<&'r Record<'r, 'r, V0>> {
    from_handle::<V0, HostcV0Diagnostic>(diagnostic)
}

#[no_mangle]
pub extern "C" fn hostc_v0_version_major() -> u32 {
    u32::from(VERSION.major)
}

#[no_mangle]
pub extern "C" fn hostc_v0_version_minor() -> u32 {
    u32::from(VERSION.minor)
}

#[no_mangle]
pub extern "C" fn hostc_v0_delegate_create() -> *mut HostcV0Delegate {
    Box::into_raw(Box::new(HostcV0Delegate { handler: None }))
}

#[no_mangle]
pub extern "C" fn hostc_v0_delegate_dispose(delegate: *mut HostcV0Delegate) {
    if delegate.is_null() {
        return;
    }
    // SAFETY: the handle came from `hostc_v0_delegate_create` and is not
    // used again by the host
    drop(unsafe { Box::from_raw(delegate) });
}

/// Set (or with NULL, clear) the delegate's handler.
#[no_mangle]
pub extern "C" fn hostc_v0_delegate_set_diagnostic_handler(
    delegate: *mut HostcV0Delegate,
    handler: Option<HostcV0DiagnosticHandler>,
) {
    // SAFETY: the host passes NULL or a live delegate
    if let Some(delegate) = unsafe { delegate.as_mut() } {
        delegate.handler = handler;
    }
}

#[no_mangle]
pub extern "C" fn hostc_v0_invocation_create() -> *mut HostcV0Invocation {
    let mut inner = Invocation::new();
    inner.set_fatal_policy(FatalPolicy::Abort);
    Box::into_raw(Box::new(HostcV0Invocation { inner }))
}

#[no_mangle]
pub extern "C" fn hostc_v0_invocation_dispose(invocation: *mut HostcV0Invocation) {
    if invocation.is_null() {
        return;
    }
    // SAFETY: the handle came from `hostc_v0_invocation_create` and is not
    // used again by the host
    let handle = unsafe { Box::from_raw(invocation) };
    handle.inner.dispose();
}

#[no_mangle]
pub extern "C" fn hostc_v0_invocation_set_frontend_arguments(
    invocation: *mut HostcV0Invocation,
    count: usize,
    arguments: *const *const c_char,
) {
    if let Some(invocation) = invocation_mut(invocation) {
        invocation.set_arguments(read_str_array(arguments, count));
    }
}

/// Register `length` bytes of `contents` as the text of `path`. The bytes
/// are copied.
#[no_mangle]
pub extern "C" fn hostc_v0_invocation_add_source_buffer(
    invocation: *mut HostcV0Invocation,
    path: *const c_char,
    contents: *const c_char,
    length: usize,
) {
    let Some(invocation) = invocation_mut(invocation) else {
        return;
    };
    match (read_str(path), read_bytes(contents, length)) {
        (Some(path), Some(contents)) => {
            invocation.add_remapped_source(path.into_owned(), &*contents);
        }
        _ => warn!("ignoring source buffer with a NULL path or contents"),
    }
}

/// Run the frontend, reporting diagnostics to `delegate`'s handler.
/// A NULL delegate runs without one.
#[no_mangle]
pub extern "C" fn hostc_v0_invoke_frontend(
    invocation: *mut HostcV0Invocation,
    delegate: *const HostcV0Delegate,
) -> c_int {
    let Some(invocation) = invocation_mut(invocation) else {
        warn!("hostc_v0_invoke_frontend called with a NULL invocation");
        return CALL_FAILED;
    };
    // SAFETY: the host passes NULL or a live delegate
    let handler = unsafe { delegate.as_ref() }.and_then(|delegate| delegate.handler);

    initialize();
    invocation.set_observer(handler.map(|handler| Observer::new(DelegateObserver { handler })));
    let status = status_or(CALL_FAILED, || match invoke(invocation) {
        Ok(status) => status,
        Err(err) => {
            debug!(%err, "engine fatal outside the abort policy");
            CALL_FAILED
        }
    });
    invocation.clear_observer();
    status
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_id(diagnostic: *const HostcV0Diagnostic) -> u64 {
    record(diagnostic).map_or(0, |record| record.view().id())
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_severity(
    diagnostic: *const HostcV0Diagnostic,
) -> HostcV0Severity {
    record(diagnostic).map_or(HostcV0Severity::Error, |record| {
        record.view().severity().into()
    })
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_location(
    diagnostic: *const HostcV0Diagnostic,
) -> HostcV0Location {
    record(diagnostic).map_or(NO_LOCATION, Record::location)
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_message(
    diagnostic: *const HostcV0Diagnostic,
) -> *const c_char {
    record(diagnostic).map_or(ptr::null(), Record::message)
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_format_string(
    diagnostic: *const HostcV0Diagnostic,
) -> *const c_char {
    record(diagnostic).map_or(ptr::null(), Record::format_string)
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_message_with_custom_format_string(
    diagnostic: *const HostcV0Diagnostic,
    format: *const c_char,
) -> *const c_char {
    match (record(diagnostic), read_str(format)) {
        (Some(record), Some(format)) => record.message_with_format_string(&format),
        _ => ptr::null(),
    }
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_ranges(
    diagnostic: *const HostcV0Diagnostic,
    count: *mut usize,
) -> *const HostcV0Range {
    let (ranges, len) = record(diagnostic).map_or((ptr::null(), 0), Record::ranges);
    write_count(count, len);
    ranges
}

#[no_mangle]
pub extern "C" fn hostc_v0_diagnostic_get_fixits(
    diagnostic: *const HostcV0Diagnostic,
    count: *mut usize,
) -> *const HostcV0FixIt {
    let (fixits, len) = record(diagnostic).map_or((ptr::null(), 0), Record::fixits);
    write_count(count, len);
    fixits
}
