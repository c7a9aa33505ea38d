//! Command-line options of the frontend.

use hostc_diagnostic::{DiagId, Diagnostic, DiagnosticArgument, DiagnosticPolicy};
use thiserror::Error;

use crate::registry::EngineRegistry;

/// What the frontend does with its inputs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrontendAction {
    /// Lex and parse only.
    Parse,
    /// Parse, then resolve names and check types.
    #[default]
    Typecheck,
}

/// One entry of the option table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngineOption {
    Action(FrontendAction),
    WarningsAsErrors,
    SuppressWarnings,
    SuppressRemarks,
    RemarkSourceLoading,
    DebugAssertImmediately,
}

/// Invalid command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown argument: '{0}'")]
    UnknownArgument(String),
    #[error("no input files")]
    NoInputFiles,
}

impl OptionError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            OptionError::UnknownArgument(arg) => Diagnostic::new(DiagId::UnknownArgument)
                .with_arg(DiagnosticArgument::identifier(arg.as_str())),
            OptionError::NoInputFiles => Diagnostic::new(DiagId::NoInputFiles),
        }
    }
}

/// Parsed frontend configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontendOptions {
    pub action: FrontendAction,
    pub policy: DiagnosticPolicy,
    pub remark_source_loading: bool,
    pub debug_assert_immediately: bool,
    pub inputs: Vec<String>,
}

impl FrontendOptions {
    /// Parse `args`. Anything starting with `-` must be a known option;
    /// everything else is an input path. The last action flag wins.
    pub fn parse(args: &[String], registry: &EngineRegistry) -> Result<Self, OptionError> {
        let mut options = FrontendOptions::default();
        for arg in args {
            if !arg.starts_with('-') || arg == "-" {
                options.inputs.push(arg.clone());
                continue;
            }
            match registry.option(arg) {
                Some(EngineOption::Action(action)) => options.action = action,
                Some(EngineOption::WarningsAsErrors) => options.policy.warnings_as_errors = true,
                Some(EngineOption::SuppressWarnings) => options.policy.suppress_warnings = true,
                Some(EngineOption::SuppressRemarks) => options.policy.suppress_remarks = true,
                Some(EngineOption::RemarkSourceLoading) => options.remark_source_loading = true,
                Some(EngineOption::DebugAssertImmediately) => options.debug_assert_immediately = true,
                None => return Err(OptionError::UnknownArgument(arg.clone())),
            }
        }
        if options.inputs.is_empty() && !options.debug_assert_immediately {
            return Err(OptionError::NoInputFiles);
        }
        Ok(options)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
