//! The hostc engine: a small compiler frontend for a Swift-like statement
//! language, invoked in process.
//!
//! The pipeline is options, then per input: load, lex, parse, check. Every
//! stage reports through a [`DiagnosticEngine`](hostc_diagnostic::DiagnosticEngine)
//! into the caller's [`DiagnosticConsumer`](hostc_diagnostic::DiagnosticConsumer).
//!
//! ```text
//! initialize_engine();
//! let status = perform_frontend(
//!     FrontendRequest { args: &args, tool: "hostc", main_addr, sources: &mut sources },
//!     &mut consumer,
//! );
//! ```

mod ast;
mod check;
mod frontend;
mod lexer;
mod options;
mod parser;
mod registry;
mod stack;
mod suggest;
mod types;

pub use frontend::{
    perform_frontend, Frontend, FrontendRequest, MainAddr, StandardFrontend, EXIT_FAILURE,
    EXIT_NO_INPUT, EXIT_SUCCESS,
};
pub use options::{EngineOption, FrontendAction, FrontendOptions, OptionError};
pub use registry::{initialize_engine, is_engine_initialized, EngineRegistry};
pub use suggest::{edit_distance, suggest_similar};
pub use types::{FunctionSig, SpelledTy, Ty};
