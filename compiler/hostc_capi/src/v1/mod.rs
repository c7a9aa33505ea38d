//! Generation 1 (`hostc_v1_*`, version 1.0): explicit initialization,
//! observers with a context pointer and a dispose callback, a configurable
//! fatal policy, and rich diagnostic accessors.
//!
//! Mirrors `include/hostc/v1.h`.

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use hostc_invoke::version::ApiVersion;
use hostc_invoke::{
    initialize, invoke, Diagnostic, DiagnosticHandler, FatalPolicy, FixIt, FormatOptions,
    Invocation, Location, Observer, Range, Severity,
};
use tracing::{debug, warn};

use crate::ffi::{read_bytes, read_str, read_str_array, status_or, write_count, CStringArena};
use crate::record::{from_handle, with_handle, Generation, Record};

pub const VERSION: ApiVersion = ApiVersion::new(1, 0);

/// Status returned by [`hostc_v1_invoke`] when the engine hit an internal
/// invariant violation under the `Report` policy, or the call panicked.
pub const HOSTC_STATUS_ENGINE_FATAL: c_int = -1;

pub const HOSTC_V1_FATAL_POLICY_ABORT: c_int = 0;
pub const HOSTC_V1_FATAL_POLICY_REPORT: c_int = 1;

/// Severity, in this generation's order.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostcV1Severity {
    Error = 0,
    Warning = 1,
    Note = 2,
    Remark = 3,
}

impl From<Severity> for HostcV1Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => HostcV1Severity::Error,
            Severity::Warning => HostcV1Severity::Warning,
            Severity::Note => HostcV1Severity::Note,
            Severity::Remark => HostcV1Severity::Remark,
        }
    }
}

/// `file` is NULL (and `line`/`column` zero) when there is no location.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV1Location {
    pub file: *const c_char,
    pub line: u32,
    pub column: u32,
}

impl HostcV1Location {
    pub const NONE: HostcV1Location = HostcV1Location {
        file: ptr::null(),
        line: 0,
        column: 0,
    };
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV1Range {
    pub location: HostcV1Location,
    /// In bytes.
    pub length: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV1FixIt {
    pub range: HostcV1Range,
    /// Empty to delete the range.
    pub replacement: *const c_char,
}

/// Presentation options for [`hostc_v1_diagnostic_get_message_with_options`].
/// NULL fields keep the plain-text default.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct HostcV1FormatOptions {
    pub opening_quote: *const c_char,
    pub closing_quote: *const c_char,
    pub aka_format: *const c_char,
    pub opaque_result_format: *const c_char,
}

impl HostcV1FormatOptions {
    fn to_options(&self) -> FormatOptions {
        let mut options = FormatOptions::plain();
        let fields = [
            (self.opening_quote, &mut options.opening_quote),
            (self.closing_quote, &mut options.closing_quote),
            (self.aka_format, &mut options.aka_format),
            (self.opaque_result_format, &mut options.opaque_result_format),
        ];
        for (ptr, field) in fields {
            if let Some(text) = read_str(ptr) {
                *field = text.into_owned();
            }
        }
        options
    }
}

/// Opaque invocation handle.
pub struct HostcV1Invocation {
    inner: Invocation,
}

/// Opaque diagnostic handle, valid only during the handler call.
pub struct HostcV1Diagnostic {
    _opaque: [u8; 0],
}

pub type HostcV1DiagnosticHandler =
    extern "C" fn(diagnostic: *const HostcV1Diagnostic, context: *mut c_void);
pub type HostcV1ContextDispose = extern "C" fn(context: *mut c_void);

struct V1;

impl Generation for V1 {
    type Location = HostcV1Location;
    type Range = HostcV1Range;
    type FixIt = HostcV1FixIt;

    fn location(strings: &CStringArena, location: Option<Location<'_>>) -> HostcV1Location {
        location.map_or(HostcV1Location::NONE, |location| HostcV1Location {
            file: strings.alloc(location.file),
            line: location.line,
            column: location.column,
        })
    }

    fn range(strings: &CStringArena, range: &Range<'_>) -> HostcV1Range {
        HostcV1Range {
            location: V1::location(strings, Some(range.location)),
            length: range.length,
        }
    }

    fn fixit(strings: &CStringArena, fixit: &FixIt<'_>) -> HostcV1FixIt {
        HostcV1FixIt {
            range: V1::range(strings, &fixit.range),
            replacement: strings.alloc(fixit.replacement),
        }
    }
}

/// A C handler plus the context it was registered with.
struct ContextObserver {
    handler: HostcV1DiagnosticHandler,
    context: *mut c_void,
    dispose: Option<HostcV1ContextDispose>,
}

// SAFETY: the context is only touched from the thread running the
// invocation, and the header requires it to be usable from that thread
unsafe impl Send for ContextObserver {}

impl DiagnosticHandler for ContextObserver {
    fn handle(&mut self, diagnostic: &Diagnostic<'_>) {
        with_handle::<V1, HostcV1Diagnostic>(diagnostic, |handle| {
            (self.handler)(handle, self.context);
        });
    }
}

impl Drop for ContextObserver {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose {
            dispose(self.context);
        }
    }
}

fn invocation_mut<'a>(invocation: *mut HostcV1Invocation) -> Option<&'a mut Invocation> {
    // SAFETY: the host passes NULL or a live handle from
    // `hostc_v1_invocation_create`, not shared with another thread
    unsafe { invocation.as_mut() }.map(|handle| &mut handle.inner)
}

fn record<'r>(diagnostic: *const HostcV1Diagnostic) -> Option<&'r Record<'r, 'r, V1>> {
    from_handle::<V1, HostcV1Diagnostic>(diagnostic)
}

#[no_mangle]
pub extern "C" fn hostc_v1_version_major() -> u32 {
    u32::from(VERSION.major)
}

#[no_mangle]
pub extern "C" fn hostc_v1_version_minor() -> u32 {
    u32::from(VERSION.minor)
}

/// Process-wide setup. Idempotent and thread-safe.
#[no_mangle]
pub extern "C" fn hostc_v1_initialize() {
    initialize();
}

#[no_mangle]
pub extern "C" fn hostc_v1_invocation_create() -> *mut HostcV1Invocation {
    let handle = Box::new(HostcV1Invocation {
        inner: Invocation::new(),
    });
    Box::into_raw(handle)
}

/// Release the invocation, its buffers and its observer. The observer's
/// dispose callback runs here if it has not run already.
#[no_mangle]
pub extern "C" fn hostc_v1_invocation_dispose(invocation: *mut HostcV1Invocation) {
    if invocation.is_null() {
        return;
    }
    // SAFETY: the handle came from `hostc_v1_invocation_create` and is not
    // used again by the host
    let handle = unsafe { Box::from_raw(invocation) };
    handle.inner.dispose();
}

/// Replace the argument vector with `count` strings from `arguments`.
#[no_mangle]
pub extern "C" fn hostc_v1_invocation_set_arguments(
    invocation: *mut HostcV1Invocation,
    count: usize,
    arguments: *const *const c_char,
) {
    if let Some(invocation) = invocation_mut(invocation) {
        invocation.set_arguments(read_str_array(arguments, count));
    }
}

/// Make `path` read `length` bytes of `contents` instead of the file on
/// disk. The bytes are copied. A later call for the same path wins.
#[no_mangle]
pub extern "C" fn hostc_v1_invocation_add_remapped_source(
    invocation: *mut HostcV1Invocation,
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
        _ => warn!("ignoring remapped source with a NULL path or contents"),
    }
}

/// Install an observer, replacing (and disposing) any previous one.
///
/// A NULL `handler` clears the observer; `context` and `dispose` are then
/// ignored.
#[no_mangle]
pub extern "C" fn hostc_v1_invocation_set_observer(
    invocation: *mut HostcV1Invocation,
    handler: Option<HostcV1DiagnosticHandler>,
    context: *mut c_void,
    dispose: Option<HostcV1ContextDispose>,
) {
    let Some(invocation) = invocation_mut(invocation) else {
        return;
    };
    let observer = handler.map(|handler| {
        Observer::new(ContextObserver {
            handler,
            context,
            dispose,
        })
    });
    invocation.set_observer(observer);
}

#[no_mangle]
pub extern "C" fn hostc_v1_invocation_set_fatal_policy(
    invocation: *mut HostcV1Invocation,
    policy: c_int,
) {
    let Some(invocation) = invocation_mut(invocation) else {
        return;
    };
    match policy {
        HOSTC_V1_FATAL_POLICY_ABORT => invocation.set_fatal_policy(FatalPolicy::Abort),
        HOSTC_V1_FATAL_POLICY_REPORT => invocation.set_fatal_policy(FatalPolicy::Report),
        other => warn!(policy = other, "unknown fatal policy; keeping the current one"),
    }
}

/// Run the invocation. Returns the engine status unchanged, or
/// [`HOSTC_STATUS_ENGINE_FATAL`].
#[no_mangle]
pub extern "C" fn hostc_v1_invoke(invocation: *mut HostcV1Invocation) -> c_int {
    let Some(invocation) = invocation_mut(invocation) else {
        warn!("hostc_v1_invoke called with a NULL invocation");
        return HOSTC_STATUS_ENGINE_FATAL;
    };
    status_or(HOSTC_STATUS_ENGINE_FATAL, || match invoke(invocation) {
        Ok(status) => status,
        Err(err) => {
            debug!(%err, "reporting engine fatal to host");
            HOSTC_STATUS_ENGINE_FATAL
        }
    })
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_id(diagnostic: *const HostcV1Diagnostic) -> u64 {
    record(diagnostic).map_or(0, |record| record.view().id())
}

/// NULL reads as `Error`.
#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_severity(
    diagnostic: *const HostcV1Diagnostic,
) -> HostcV1Severity {
    record(diagnostic).map_or(HostcV1Severity::Error, |record| {
        record.view().severity().into()
    })
}

/// Catalog name, e.g. `cannot_find_in_scope`.
#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_name(
    diagnostic: *const HostcV1Diagnostic,
) -> *const c_char {
    record(diagnostic).map_or(ptr::null(), Record::name)
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_location(
    diagnostic: *const HostcV1Diagnostic,
) -> HostcV1Location {
    record(diagnostic).map_or(HostcV1Location::NONE, Record::location)
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_message(
    diagnostic: *const HostcV1Diagnostic,
) -> *const c_char {
    record(diagnostic).map_or(ptr::null(), Record::message)
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_format_string(
    diagnostic: *const HostcV1Diagnostic,
) -> *const c_char {
    record(diagnostic).map_or(ptr::null(), Record::format_string)
}

/// Render this diagnostic's arguments into `format` (`%0`, `%1`, ...).
#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_message_with_custom_format_string(
    diagnostic: *const HostcV1Diagnostic,
    format: *const c_char,
) -> *const c_char {
    match (record(diagnostic), read_str(format)) {
        (Some(record), Some(format)) => record.message_with_format_string(&format),
        _ => ptr::null(),
    }
}

/// Render the message with custom quoting. NULL `options` means defaults.
#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_message_with_options(
    diagnostic: *const HostcV1Diagnostic,
    options: *const HostcV1FormatOptions,
) -> *const c_char {
    let Some(record) = record(diagnostic) else {
        return ptr::null();
    };
    // SAFETY: the host passes NULL or a valid options struct
    let options = unsafe { options.as_ref() }
        .map(HostcV1FormatOptions::to_options)
        .unwrap_or_default();
    record.message_with_options(&options)
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_ranges(
    diagnostic: *const HostcV1Diagnostic,
    count: *mut usize,
) -> *const HostcV1Range {
    let (ranges, len) = record(diagnostic).map_or((ptr::null(), 0), Record::ranges);
    write_count(count, len);
    ranges
}

#[no_mangle]
pub extern "C" fn hostc_v1_diagnostic_get_fixits(
    diagnostic: *const HostcV1Diagnostic,
    count: *mut usize,
) -> *const HostcV1FixIt {
    let (fixits, len) = record(diagnostic).map_or((ptr::null(), 0), Record::fixits);
    write_count(count, len);
    fixits
}

#[cfg(test)]
mod tests;
