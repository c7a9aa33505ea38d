//! In-process compiler invocation.
//!
//! A host builds an [`Invocation`] (arguments, in-memory source buffers,
//! an [`Observer`]), runs it with [`invoke`], and receives every diagnostic
//! the engine emits as a borrow-scoped [`Diagnostic`] record while the call
//! is in progress.
//!
//! ```no_run
//! use hostc_invoke::{initialize, invoke, Diagnostic, Invocation, Observer};
//!
//! initialize();
//! let mut invocation = Invocation::new();
//! invocation.set_arguments(["-typecheck", "input.swift"]);
//! invocation.add_remapped_source("input.swift", "let x = y\n");
//! invocation.set_observer(Some(Observer::new(|diag: &Diagnostic<'_>| {
//!     eprintln!("{}: {}", diag.severity(), diag.message());
//! })));
//! let status = invoke(&mut invocation);
//! invocation.dispose();
//! ```
//!
//! # Lifecycle
//!
//! - [`initialize`] once per process before the first invocation.
//! - Invocations run one at a time per process; concurrent calls block.
//! - Handlers run on the invoking thread, in emission order, and must not
//!   call [`invoke`] themselves.

mod adapter;
mod driver;
mod init;
mod invocation;
mod observer;
mod record;
pub mod version;

pub use driver::{invoke, Driver, InvokeError, TOOL_NAME};
pub use hostc_diagnostic::FormatOptions;
pub use init::{initialize, is_initialized};
pub use invocation::{FatalPolicy, Invocation};
pub use observer::{DiagnosticHandler, Observer};
pub use record::{Diagnostic, FixIt, Location, Range, Severity};
