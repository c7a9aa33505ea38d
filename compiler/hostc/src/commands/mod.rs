//! What the binary does once the command line is parsed.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use hostc_frontend::initialize_engine;
use hostc_invoke::{initialize, invoke, Diagnostic, Invocation, Observer};
use parking_lot::Mutex;
use tracing::debug;

use crate::cli::CompileOptions;
use crate::emitter::TerminalEmitter;

/// Bad driver flags or an unreadable `--remap` file.
pub const EXIT_USAGE: i32 = 2;
/// The engine hit an internal invariant violation under `--fatal=report`.
pub const EXIT_ENGINE_FATAL: i32 = 3;

/// Compile with diagnostics printed to stderr. Returns the exit code.
pub fn compile(options: &CompileOptions) -> i32 {
    let is_tty = io::stderr().is_terminal();
    compile_to(options, io::stderr(), is_tty)
}

/// Compile with diagnostics printed to `writer`. Driver errors still go to
/// stderr.
pub fn compile_to<W>(options: &CompileOptions, writer: W, is_tty: bool) -> i32
where
    W: Write + Send + 'static,
{
    initialize();

    let mut invocation = Invocation::new();
    invocation.set_arguments(options.frontend_args.iter().cloned());
    invocation.set_fatal_policy(options.fatal);
    for remap in &options.remaps {
        match fs::read_to_string(&remap.file) {
            Ok(contents) => invocation.add_remapped_source(remap.path.clone(), contents),
            Err(err) => {
                eprintln!(
                    "error: cannot read '{}' for --remap={}: {err}",
                    remap.file.display(),
                    remap.path
                );
                return EXIT_USAGE;
            }
        }
    }

    let emitter = Arc::new(Mutex::new(TerminalEmitter::with_color_mode(
        writer,
        options.color,
        is_tty,
    )));
    let sink = Arc::clone(&emitter);
    invocation.set_observer(Some(Observer::new(move |diag: &Diagnostic<'_>| {
        sink.lock().emit(diag);
    })));

    let result = invoke(&mut invocation);
    invocation.dispose();

    let mut emitter = emitter.lock();
    emitter.emit_summary();
    if let Err(err) = emitter.flush() {
        debug!(%err, "flushing diagnostics failed");
    }

    match result {
        Ok(status) => status,
        Err(err) => {
            eprintln!("error: {err}");
            EXIT_ENGINE_FATAL
        }
    }
}

/// The kind and message template of a catalog entry, or `None` for an
/// unknown name.
pub fn explain_text(name: &str) -> Option<String> {
    initialize();
    let id = initialize_engine().diagnostic(name)?;
    Some(format!("{} ({})\n  {}\n", id.name(), id.kind(), id.format()))
}

pub fn explain(name: &str) -> i32 {
    match explain_text(name) {
        Some(text) => {
            print!("{text}");
            0
        }
        None => {
            eprintln!("error: no diagnostic named '{name}'");
            EXIT_USAGE
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
