//! Process-wide engine tables, built once.
//!
//! The registry holds the option table, the builtin functions and types,
//! and a by-name index of the diagnostic catalog. Building it is the
//! engine's one-time global setup; [`initialize_engine`] may be called any
//! number of times from any thread.

use std::sync::OnceLock;

use hostc_diagnostic::DiagId;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::options::{EngineOption, FrontendAction};
use crate::types::{FunctionSig, Ty};

static PRINT: FunctionSig = FunctionSig {
    params: &[Ty::Any],
    result: Ty::Void,
};

static MAX: FunctionSig = FunctionSig {
    params: &[Ty::Int, Ty::Int],
    result: Ty::Int,
};

static MIN: FunctionSig = FunctionSig {
    params: &[Ty::Int, Ty::Int],
    result: Ty::Int,
};

const OPTIONS: &[(&str, EngineOption)] = &[
    ("-parse", EngineOption::Action(FrontendAction::Parse)),
    ("-typecheck", EngineOption::Action(FrontendAction::Typecheck)),
    ("-warnings-as-errors", EngineOption::WarningsAsErrors),
    ("-suppress-warnings", EngineOption::SuppressWarnings),
    ("-suppress-remarks", EngineOption::SuppressRemarks),
    ("-Rsource-loading", EngineOption::RemarkSourceLoading),
    ("-debug-assert-immediately", EngineOption::DebugAssertImmediately),
];

const FUNCTIONS: &[(&str, &FunctionSig)] = &[("print", &PRINT), ("max", &MAX), ("min", &MIN)];

const TYPES: &[(&str, Ty)] = &[("Int", Ty::Int), ("String", Ty::String), ("Bool", Ty::Bool)];

/// Immutable engine-wide lookup tables.
#[derive(Debug)]
pub struct EngineRegistry {
    options: FxHashMap<&'static str, EngineOption>,
    functions: FxHashMap<&'static str, &'static FunctionSig>,
    types: FxHashMap<&'static str, Ty>,
    diagnostics: FxHashMap<&'static str, DiagId>,
}

static REGISTRY: OnceLock<EngineRegistry> = OnceLock::new();

/// Build the engine tables if that has not happened yet.
pub fn initialize_engine() -> &'static EngineRegistry {
    REGISTRY.get_or_init(|| {
        debug!("initializing engine registry");
        EngineRegistry::build()
    })
}

/// Whether [`initialize_engine`] has completed in this process.
pub fn is_engine_initialized() -> bool {
    REGISTRY.get().is_some()
}

impl EngineRegistry {
    fn build() -> Self {
        EngineRegistry {
            options: OPTIONS.iter().copied().collect(),
            functions: FUNCTIONS.iter().copied().collect(),
            types: TYPES.iter().copied().collect(),
            diagnostics: DiagId::ALL.iter().map(|&id| (id.name(), id)).collect(),
        }
    }

    pub fn option(&self, spelling: &str) -> Option<EngineOption> {
        self.options.get(spelling).copied()
    }

    /// Option spellings, in table order.
    pub fn option_names(&self) -> impl Iterator<Item = &'static str> {
        OPTIONS.iter().map(|(name, _)| *name)
    }

    pub fn function(&self, name: &str) -> Option<&'static FunctionSig> {
        self.functions.get(name).copied()
    }

    /// Builtin function names, in table order.
    pub fn function_names(&self) -> impl Iterator<Item = &'static str> {
        FUNCTIONS.iter().map(|(name, _)| *name)
    }

    pub fn builtin_type(&self, name: &str) -> Option<Ty> {
        self.types.get(name).copied()
    }

    /// Builtin type names, in table order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> {
        TYPES.iter().map(|(name, _)| *name)
    }

    /// Catalog entry by its snake_case name.
    pub fn diagnostic(&self, name: &str) -> Option<DiagId> {
        self.diagnostics.get(name).copied()
    }
}
