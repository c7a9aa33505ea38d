//! C ABI for in-process compiler invocation (`libhostc_capi`).
//!
//! Two API generations are exported side by side and never share symbols
//! or types:
//!
//! - [`v0`]: `hostc_v0_*`, version 0.1. Delegate with a context-free
//!   handler, frontend arguments and source buffers, abort on engine fatal.
//! - [`v1`]: `hostc_v1_*`, version 1.0. Explicit initialization, observers
//!   with a context and a dispose callback, selectable fatal policy, rich
//!   message formatting.
//!
//! The matching headers are `include/hostc/v0.h` and `include/hostc/v1.h`.
//!
//! # Safety
//!
//! Entry points are `extern "C"` functions taking raw pointers from the
//! host. NULL handles are tolerated everywhere; any other invalid pointer,
//! a handle used after dispose, or a diagnostic handle used after its
//! handler returned, is undefined behavior. Panics never cross the
//! boundary: `invoke` entry points catch them and return a failure status.

#![warn(clippy::allow_attributes_without_reason)]
#![allow(
    unsafe_code,
    reason = "C-ABI entry points require unsafe for raw pointer operations"
)]
#![allow(
    clippy::not_unsafe_ptr_arg_deref,
    reason = "FFI entry points receive pointers from the host, which guarantees validity"
)]

mod ffi;
mod record;
pub mod v0;
pub mod v1;
