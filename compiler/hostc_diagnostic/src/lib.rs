//! Diagnostic system of the hostc engine.
//!
//! This is the *internal*, rich representation: catalog ids, typed message
//! arguments, spans into the [`SourceManager`](hostc_source::SourceManager),
//! child notes. Hosts never see these types directly; the invocation layer
//! translates each emission into its stable record shape.
//!
//! - [`DiagId`]: message catalog (kind + format string per id)
//! - [`Diagnostic`]: one emission, built with `with_*` methods
//! - [`format`]: `%0`-style placeholder rendering with [`FormatOptions`]
//! - [`DiagnosticConsumer`]: the sink the engine reports into
//! - [`DiagnosticEngine`]: severity policy, counting, note flattening
//!
//! # Error Guarantees
//!
//! ```text
//! // Can only get ErrorGuaranteed once an error went through the engine
//! if let Some(guarantee) = engine.has_errors() { return Err(guarantee); }
//! ```

mod argument;
mod catalog;
pub mod consumer;
mod diagnostic;
mod engine;
pub mod format;
mod guarantee;

pub use argument::{DiagnosticArgument, TypeArg};
pub use catalog::DiagId;
pub use consumer::{CollectingConsumer, DiagnosticConsumer, NullConsumer};
pub use diagnostic::{Diagnostic, DiagnosticKind, FixIt};
pub use engine::{DiagnosticEngine, DiagnosticPolicy};
pub use format::FormatOptions;
pub use guarantee::ErrorGuaranteed;
