//! hostc CLI
//!
//! Runs one in-process compiler invocation and prints its diagnostics.

use hostc::cli::{parse_args, Command};
use hostc::commands::{compile, explain, EXIT_USAGE};
use hostc::logging::{init_tracing, LOG_ENV};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match parse_args(&args) {
        Ok(Command::Compile(options)) => compile(&options),
        Ok(Command::Explain(name)) => explain(&name),
        Ok(Command::Help) => {
            print_usage();
            0
        }
        Ok(Command::Version) => {
            println!(
                "hostc {} (invocation API {})",
                env!("CARGO_PKG_VERSION"),
                hostc_invoke::version::CURRENT
            );
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            EXIT_USAGE
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!("Usage: hostc [driver options] [--] <engine arguments>");
    println!();
    println!("Driver options:");
    println!("  --color=<mode>       auto, always or never (default: auto)");
    println!("  --remap=PATH=FILE    Compile PATH from the contents of FILE");
    println!("  --fatal=<policy>     Engine invariant violations: abort or report (default: report)");
    println!("  --explain <name>     Describe a diagnostic, e.g. cannot_find_in_scope");
    println!("  --help, -h           Show this help message");
    println!("  --version, -V        Show version information");
    println!();
    println!("Engine arguments:");
    println!("  -parse, -typecheck   Stop after parsing, or type check (default)");
    println!("  -warnings-as-errors  Report warnings as errors");
    println!("  -suppress-warnings   Drop warnings");
    println!("  -suppress-remarks    Drop remarks");
    println!("  -Rsource-loading     Remark on every loaded input");
    println!();
    println!("Logging: set {LOG_ENV}=<filter>, e.g. {LOG_ENV}=hostc_invoke=debug");
}
