//! Command-line parsing.
//!
//! Driver flags come first; the first argument that is not a driver flag,
//! or everything after `--`, is passed to the engine untouched.

use std::path::PathBuf;

use hostc_invoke::FatalPolicy;
use thiserror::Error;

use crate::emitter::ColorMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Compile(CompileOptions),
    Explain(String),
    Help,
    Version,
}

/// `--remap=PATH=FILE`: compile `PATH` from the contents of `FILE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remap {
    pub path: String,
    pub file: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub color: ColorMode,
    pub remaps: Vec<Remap>,
    pub fatal: FatalPolicy,
    pub frontend_args: Vec<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("--remap expects PATH=FILE, got '{0}'")]
    MalformedRemap(String),
    #[error("--explain needs a diagnostic name")]
    MissingExplainName,
    #[error("unknown driver option '{0}' (engine arguments go after --)")]
    UnknownOption(String),
}

fn parse_color(value: &str) -> Result<ColorMode, CliError> {
    match value {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(CliError::InvalidValue {
            flag: "--color",
            value: value.to_string(),
        }),
    }
}

fn parse_fatal(value: &str) -> Result<FatalPolicy, CliError> {
    match value {
        "abort" => Ok(FatalPolicy::Abort),
        "report" => Ok(FatalPolicy::Report),
        _ => Err(CliError::InvalidValue {
            flag: "--fatal",
            value: value.to_string(),
        }),
    }
}

fn parse_remap(value: &str) -> Result<Remap, CliError> {
    match value.split_once('=') {
        Some((path, file)) if !path.is_empty() && !file.is_empty() => Ok(Remap {
            path: path.to_string(),
            file: PathBuf::from(file),
        }),
        _ => Err(CliError::MalformedRemap(value.to_string())),
    }
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    if args.is_empty() {
        return Ok(Command::Help);
    }

    let mut options = CompileOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--" => {
                options.frontend_args.extend(iter.by_ref().cloned());
                break;
            }
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--explain" => {
                return iter
                    .next()
                    .map(|name| Command::Explain(name.clone()))
                    .ok_or(CliError::MissingExplainName);
            }
            _ => {}
        }

        if let Some(value) = arg.strip_prefix("--color=") {
            options.color = parse_color(value)?;
        } else if let Some(value) = arg.strip_prefix("--fatal=") {
            options.fatal = parse_fatal(value)?;
        } else if let Some(value) = arg.strip_prefix("--remap=") {
            options.remaps.push(parse_remap(value)?);
        } else if arg.starts_with("--") {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            options.frontend_args.push(arg.clone());
            options.frontend_args.extend(iter.by_ref().cloned());
            break;
        }
    }
    Ok(Command::Compile(options))
}
