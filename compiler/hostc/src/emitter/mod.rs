//! Terminal Emitter
//!
//! Prints diagnostics as they arrive from an observer, one header line per
//! diagnostic followed by its ranges and fix-its.

use std::io::{self, Write};

use hostc_invoke::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const REMARK: &str = "\x1b[1;35m"; // Bold magenta
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    error_count: usize,
    warning_count: usize,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            error_count: 0,
            warning_count: 0,
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Remark => colors::REMARK,
        };
        self.write_colored(severity.as_str(), color);
    }

    fn write_name(&mut self, name: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{name}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{name}]");
        }
    }

    /// Header: `file:line:col: severity[name]: message`
    pub fn emit(&mut self, diagnostic: &Diagnostic<'_>) {
        match diagnostic.severity() {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note | Severity::Remark => {}
        }

        if let Some(location) = diagnostic.location() {
            let _ = write!(self.writer, "{location}: ");
        }
        self.write_severity(diagnostic.severity());
        self.write_name(diagnostic.name());
        let _ = writeln!(self.writer, ": {}", diagnostic.message());

        for range in diagnostic.ranges() {
            let _ = write!(self.writer, "  --> ");
            let text = format!(
                "{} ({} byte{})",
                range.location,
                range.length,
                plural_s(range.length as usize)
            );
            self.write_colored(&text, colors::SECONDARY);
            let _ = writeln!(self.writer);
        }

        for fixit in diagnostic.fixits() {
            let _ = write!(self.writer, "  = ");
            self.write_colored("fix-it", colors::HELP);
            let location = fixit.range.location;
            let length = fixit.range.length;
            if fixit.replacement.is_empty() {
                let _ = writeln!(
                    self.writer,
                    ": delete {length} byte{} at {}:{}",
                    plural_s(length as usize),
                    location.line,
                    location.column
                );
            } else {
                let _ = writeln!(
                    self.writer,
                    ": replace {length} byte{} at {}:{} with \"{}\"",
                    plural_s(length as usize),
                    location.line,
                    location.column,
                    fixit.replacement
                );
            }
        }
    }

    /// `error: aborting due to ...` / `warning: N warnings emitted`.
    pub fn emit_summary(&mut self) {
        let (errors, warnings) = (self.error_count, self.warning_count);
        if errors > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if errors == 1 {
                "previous error".to_string()
            } else {
                format!("{errors} previous errors")
            };
            if warnings > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warnings} warning{} emitted",
                    plural_s(warnings)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warnings > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(self.writer, ": {warnings} warning{} emitted", plural_s(warnings));
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
