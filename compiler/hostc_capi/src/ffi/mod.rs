//! Boundary plumbing shared by every API generation: reading host strings,
//! owning strings handed back to the host, and keeping panics on the Rust
//! side of the boundary.

use std::any::Any;
use std::borrow::Cow;
use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

/// Owns every C string returned from a diagnostic accessor until the handler
/// call that produced it returns.
#[derive(Default)]
pub(crate) struct CStringArena {
    strings: RefCell<Vec<CString>>,
}

impl CStringArena {
    /// Copy `text` into the arena and return a pointer that stays valid as
    /// long as the arena does.
    pub(crate) fn alloc(&self, text: &str) -> *const c_char {
        let owned = to_cstring(text);
        // The heap buffer does not move when the `CString` is moved.
        let ptr = owned.as_ptr();
        self.strings.borrow_mut().push(owned);
        ptr
    }
}

/// Interior NUL bytes cannot cross the boundary and are dropped.
pub(crate) fn to_cstring(text: &str) -> CString {
    let bytes: Vec<u8> = text.bytes().filter(|&b| b != 0).collect();
    CString::new(bytes).unwrap_or_default()
}

/// Read a NUL-terminated host string. NULL reads as `None`; invalid UTF-8
/// is replaced.
pub(crate) fn read_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: the host passes a NUL-terminated string that outlives the call
    let cstr = unsafe { CStr::from_ptr(ptr) };
    Some(cstr.to_string_lossy())
}

/// Read `len` bytes at `ptr` as text. Buffers need not be NUL-terminated.
pub(crate) fn read_bytes<'a>(ptr: *const c_char, len: usize) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        return (len == 0).then_some(Cow::Borrowed(""));
    }
    // SAFETY: the host guarantees `ptr` is valid for `len` bytes
    let bytes = unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) };
    Some(String::from_utf8_lossy(bytes))
}

/// Read an array of `count` host strings. NULL entries are skipped.
pub(crate) fn read_str_array(argv: *const *const c_char, count: usize) -> Vec<String> {
    if argv.is_null() || count == 0 {
        return Vec::new();
    }
    // SAFETY: the host guarantees `argv` holds `count` pointers
    let ptrs = unsafe { std::slice::from_raw_parts(argv, count) };
    ptrs.iter()
        .filter_map(|&ptr| read_str(ptr))
        .map(Cow::into_owned)
        .collect()
}

/// Store `len` through an optional out-pointer.
pub(crate) fn write_count(out: *mut usize, len: usize) {
    if !out.is_null() {
        // SAFETY: the host passes either NULL or a writable `size_t`
        unsafe { out.write(len) };
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Run `body`, turning a panic into `fatal_status`.
pub(crate) fn status_or(fatal_status: c_int, body: impl FnOnce() -> c_int) -> c_int {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(status) => status,
        Err(payload) => {
            error!(panic = panic_message(payload.as_ref()), "panic caught at the C boundary");
            fatal_status
        }
    }
}
