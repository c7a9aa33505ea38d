//! Engine entry point.
//!
//! [`perform_frontend`] is what an invocation driver calls: it takes the
//! raw argument vector, loads inputs through the caller's
//! [`SourceManager`] (so remapped buffers win over the disk), runs the
//! requested action, and reports every diagnostic to a
//! [`DiagnosticConsumer`]. The returned status is a process exit code.

use std::fmt;
use std::num::NonZeroUsize;

use hostc_diagnostic::{
    DiagId, Diagnostic, DiagnosticArgument, DiagnosticConsumer, DiagnosticEngine, DiagnosticPolicy,
};
use hostc_source::{FileId, SourceManager, Span};
use tracing::{debug, trace};

use crate::check::check;
use crate::lexer::lex;
use crate::options::{FrontendAction, FrontendOptions};
use crate::parser::parse;
use crate::registry::initialize_engine;

/// Status when every input was processed without errors.
pub const EXIT_SUCCESS: i32 = 0;
/// Status when at least one error (or an engine bug) was reported.
pub const EXIT_FAILURE: i32 = 1;
/// Status for an empty argument vector. Nothing is run and nothing is
/// reported.
pub const EXIT_NO_INPUT: i32 = 0;

/// Address the engine may use to find out which binary it is running in.
///
/// Never null. Conventionally the address of the embedding program's own
/// entry function.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MainAddr(NonZeroUsize);

impl MainAddr {
    /// `None` for a null address.
    pub fn new(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(MainAddr)
    }

    /// The address of `f`.
    pub fn of(f: fn()) -> Self {
        MainAddr(NonZeroUsize::new(f as usize).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Debug for MainAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MainAddr({:#x})", self.0.get())
    }
}

/// Everything one engine run needs, besides the diagnostic sink.
#[derive(Debug)]
pub struct FrontendRequest<'a> {
    pub args: &'a [String],
    /// Name the engine reports itself as (`argv[0]` for a real driver).
    pub tool: &'a str,
    pub main_addr: MainAddr,
    pub sources: &'a mut SourceManager,
}

/// An engine that can be invoked in process.
///
/// The production implementation is [`StandardFrontend`]; drivers accept
/// any implementation so that tests can inject engines with scripted
/// behavior.
pub trait Frontend: Send + Sync {
    fn perform(&self, request: FrontendRequest<'_>, consumer: &mut dyn DiagnosticConsumer) -> i32;
}

/// The real engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardFrontend;

impl Frontend for StandardFrontend {
    fn perform(&self, request: FrontendRequest<'_>, consumer: &mut dyn DiagnosticConsumer) -> i32 {
        perform_frontend(request, consumer)
    }
}

/// Run the engine once.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(tool = request.tool, args = request.args.len(), main_addr = ?request.main_addr)
)]
pub fn perform_frontend(request: FrontendRequest<'_>, consumer: &mut dyn DiagnosticConsumer) -> i32 {
    let FrontendRequest { args, sources, .. } = request;
    if args.is_empty() {
        debug!("no arguments, nothing to do");
        return EXIT_NO_INPUT;
    }

    let registry = initialize_engine();
    let options = match FrontendOptions::parse(args, registry) {
        Ok(options) => options,
        Err(error) => {
            debug!(%error, "rejected command line");
            let mut engine = DiagnosticEngine::new(consumer, DiagnosticPolicy::default());
            engine.emit(sources, error.to_diagnostic());
            engine.finish();
            return EXIT_FAILURE;
        }
    };

    let mut engine = DiagnosticEngine::new(consumer, options.policy);

    if options.debug_assert_immediately {
        engine.emit(
            sources,
            Diagnostic::new(DiagId::InvariantViolation).with_arg(DiagnosticArgument::string(
                "assertion requested by -debug-assert-immediately",
            )),
        );
        engine.finish();
        return EXIT_FAILURE;
    }

    for input in &options.inputs {
        let file = match sources.load(input) {
            Ok(file) => file,
            Err(error) => {
                engine.emit(
                    sources,
                    Diagnostic::new(DiagId::ErrorOpeningInput)
                        .with_arg(DiagnosticArgument::identifier(input.as_str()))
                        .with_arg(DiagnosticArgument::string(error.reason())),
                );
                continue;
            }
        };
        process_file(&mut engine, sources, file, &options);
    }

    engine.finish();
    let status = if engine.had_bug() || engine.has_errors().is_some() {
        EXIT_FAILURE
    } else {
        EXIT_SUCCESS
    };
    debug!(
        status,
        errors = engine.error_count(),
        warnings = engine.warning_count(),
        emitted = engine.emitted_count(),
        "frontend finished"
    );
    status
}

fn process_file(
    engine: &mut DiagnosticEngine<'_>,
    sources: &SourceManager,
    file: FileId,
    options: &FrontendOptions,
) {
    let Some(source) = sources.file(file) else {
        return;
    };
    trace!(path = source.path(), "processing input");

    if options.remark_source_loading {
        engine.emit(
            sources,
            Diagnostic::new(DiagId::SourceLoaded)
                .at(Span::point(file, 0))
                .with_arg(DiagnosticArgument::identifier(source.path()))
                .with_arg(DiagnosticArgument::string(source.origin().to_string())),
        );
    }

    let lexed = lex(source.text(), file);
    for diag in lexed.diagnostics {
        engine.emit(sources, diag);
    }

    let parsed = parse(&lexed.tokens);
    for diag in parsed.diagnostics {
        engine.emit(sources, diag);
    }

    if options.action == FrontendAction::Typecheck {
        for diag in check(&parsed.statements, initialize_engine()) {
            engine.emit(sources, diag);
        }
    }
}
