use std::io::Write;
use std::sync::Arc;

use hostc_invoke::FatalPolicy;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::cli::Remap;
use crate::emitter::ColorMode;

/// A writer the test keeps a handle to after the emitter takes ownership.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn options(frontend_args: &[&str]) -> CompileOptions {
    CompileOptions {
        color: ColorMode::Never,
        frontend_args: frontend_args.iter().map(ToString::to_string).collect(),
        ..CompileOptions::default()
    }
}

#[test]
fn remapped_file_is_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real.swift");
    std::fs::write(&real, "print(undeclaredThing)\n").unwrap();

    let mut options = options(&["-typecheck", "input.swift"]);
    options.remaps.push(Remap {
        path: "input.swift".to_string(),
        file: real,
    });
    let out = SharedBuf::default();
    let status = compile_to(&options, out.clone(), false);

    assert_eq!(status, 1);
    let text = out.text();
    assert!(
        text.starts_with(
            "input.swift:1:7: error[cannot_find_in_scope]: cannot find 'undeclaredThing' in scope\n"
        ),
        "{text}"
    );
}

#[test]
fn missing_remap_file_is_a_usage_error() {
    let mut options = options(&["-typecheck", "input.swift"]);
    options.remaps.push(Remap {
        path: "input.swift".to_string(),
        file: "/nonexistent/hostc/remap.swift".into(),
    });
    let out = SharedBuf::default();
    assert_eq!(compile_to(&options, out.clone(), false), EXIT_USAGE);
    assert_eq!(out.text(), "");
}

#[test]
fn unreadable_input_is_reported_by_the_engine() {
    let out = SharedBuf::default();
    let status = compile_to(
        &options(&["-typecheck", "/nonexistent/hostc/input.swift"]),
        out.clone(),
        false,
    );
    assert_eq!(status, 1);
    assert!(out.text().contains("error[error_opening_input]"));
}

#[test]
fn engine_fatal_maps_to_its_exit_code() {
    let mut options = options(&["-debug-assert-immediately"]);
    options.fatal = FatalPolicy::Report;
    let out = SharedBuf::default();
    assert_eq!(compile_to(&options, out.clone(), false), EXIT_ENGINE_FATAL);
    assert_eq!(out.text(), "");
}

#[test]
fn explain_known_and_unknown_names() {
    assert_eq!(
        explain_text("no_input_files").as_deref(),
        Some("no_input_files (error)\n  no input files\n")
    );
    assert_eq!(explain_text("not_a_diagnostic"), None);
}
