use pretty_assertions::assert_eq;

use super::*;
use crate::registry::initialize_engine;

fn parse(args: &[&str]) -> Result<FrontendOptions, OptionError> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    FrontendOptions::parse(&args, initialize_engine())
}

#[test]
fn defaults_to_typecheck() {
    let options = parse(&["main.swift"]).unwrap();
    assert_eq!(options.action, FrontendAction::Typecheck);
    assert_eq!(options.inputs, vec!["main.swift".to_string()]);
    assert_eq!(options.policy, DiagnosticPolicy::default());
}

#[test]
fn flags_set_policy() {
    let options = parse(&[
        "-parse",
        "-warnings-as-errors",
        "-suppress-remarks",
        "-Rsource-loading",
        "a.swift",
        "b.swift",
    ])
    .unwrap();
    assert_eq!(options.action, FrontendAction::Parse);
    assert!(options.policy.warnings_as_errors);
    assert!(options.policy.suppress_remarks);
    assert!(!options.policy.suppress_warnings);
    assert!(options.remark_source_loading);
    assert_eq!(options.inputs.len(), 2);
}

#[test]
fn last_action_wins() {
    let options = parse(&["-parse", "-typecheck", "a.swift"]).unwrap();
    assert_eq!(options.action, FrontendAction::Typecheck);
}

#[test]
fn unknown_argument() {
    let err = parse(&["-frobnicate", "a.swift"]).unwrap_err();
    assert_eq!(err, OptionError::UnknownArgument("-frobnicate".to_string()));
    assert_eq!(
        err.to_diagnostic().render(&hostc_diagnostic::FormatOptions::default()),
        "unknown argument: '-frobnicate'"
    );
}

#[test]
fn options_without_inputs() {
    assert_eq!(parse(&["-typecheck"]).unwrap_err(), OptionError::NoInputFiles);
}

#[test]
fn debug_assert_needs_no_inputs() {
    assert!(parse(&["-debug-assert-immediately"]).unwrap().debug_assert_immediately);
}
