//! Placeholder rendering for diagnostic format strings.
//!
//! Syntax understood by [`render`]:
//!
//! | Placeholder | Meaning |
//! |---|---|
//! | `%N` | argument `N` (single digit) |
//! | `%%` | a literal `%` |
//! | `%sN` | `"s"` unless integer argument `N` is 1 |
//! | `%select{a\|b\|...}N` | branch chosen by integer argument `N` |
//!
//! Anything else after `%` is copied through unchanged, as is a placeholder
//! naming an argument that does not exist. Rendering never fails.

use crate::{DiagnosticArgument, TypeArg};

/// Presentation rules for quoting and type decoration.
///
/// The templates use `%s` for each inserted name, in order:
/// `aka_format` receives (alias, canonical type), `opaque_result_format`
/// receives (type, declaration). An empty `aka_format` disables alias
/// expansion.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    pub opening_quote: String,
    pub closing_quote: String,
    pub aka_format: String,
    pub opaque_result_format: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::plain()
    }
}

impl FormatOptions {
    /// Plain-text presentation: `'name'`, `'Alias' (aka 'Type')`.
    pub fn plain() -> Self {
        FormatOptions {
            opening_quote: "'".to_string(),
            closing_quote: "'".to_string(),
            aka_format: "'%s' (aka '%s')".to_string(),
            opaque_result_format: "'%s' (result type of '%s')".to_string(),
        }
    }

    /// Markdown presentation: backtick-quoted code spans.
    pub fn markdown() -> Self {
        FormatOptions {
            opening_quote: "`".to_string(),
            closing_quote: "`".to_string(),
            aka_format: "`%s` (aka `%s`)".to_string(),
            opaque_result_format: "`%s` (result type of `%s`)".to_string(),
        }
    }

    /// Same quoting, but aliases are shown without their expansion.
    #[must_use]
    pub fn without_aka(mut self) -> Self {
        self.aka_format.clear();
        self
    }

    fn quoted(&self, out: &mut String, text: &str) {
        out.push_str(&self.opening_quote);
        out.push_str(text);
        out.push_str(&self.closing_quote);
    }

    fn write_type(&self, out: &mut String, ty: &TypeArg) {
        if let Some(origin) = &ty.opaque_origin {
            fill_template(out, &self.opaque_result_format, &[&ty.name, origin]);
        } else if let (Some(aka), false) = (&ty.aka, self.aka_format.is_empty()) {
            fill_template(out, &self.aka_format, &[&ty.name, aka]);
        } else {
            self.quoted(out, &ty.name);
        }
    }
}

/// Substitute `%s` occurrences in `template` with `values`, in order.
fn fill_template(out: &mut String, template: &str, values: &[&str]) {
    let mut values = values.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("%s") {
        out.push_str(&rest[..pos]);
        match values.next() {
            Some(value) => out.push_str(value),
            None => out.push_str("%s"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
}

fn write_argument(out: &mut String, arg: &DiagnosticArgument, options: &FormatOptions) {
    match arg {
        DiagnosticArgument::String(text) => out.push_str(text),
        DiagnosticArgument::Identifier(name) => options.quoted(out, name),
        DiagnosticArgument::Type(ty) => options.write_type(out, ty),
        DiagnosticArgument::Integer(n) => out.push_str(&n.to_string()),
    }
}

/// Parse a single-digit argument index at the start of `s`.
fn arg_index(s: &str) -> Option<usize> {
    s.as_bytes()
        .first()
        .filter(|b| b.is_ascii_digit())
        .map(|b| usize::from(b - b'0'))
}

/// Split `%select` branches on top-level `|`, returning the branches and the
/// byte length consumed up to and including the closing brace.
fn select_branches(body: &str) -> Option<(Vec<&str>, usize)> {
    let mut depth = 0usize;
    let mut branches = Vec::new();
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => {
                branches.push(&body[start..i]);
                return Some((branches, i + 1));
            }
            '}' => depth -= 1,
            '|' if depth == 0 => {
                branches.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    None
}

/// Render `format` with `args`.
pub fn render(format: &str, args: &[DiagnosticArgument], options: &FormatOptions) -> String {
    let mut out = String::with_capacity(format.len() + 16);
    render_into(&mut out, format, args, options);
    out
}

fn render_into(out: &mut String, format: &str, args: &[DiagnosticArgument], options: &FormatOptions) {
    let mut rest = format;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('%') {
            out.push('%');
            rest = tail;
        } else if let Some(index) = arg_index(after) {
            match args.get(index) {
                Some(arg) => write_argument(out, arg, options),
                None => out.push_str(&rest[pos..pos + 2]),
            }
            rest = &after[1..];
        } else if let Some(body) = after.strip_prefix("select{") {
            let Some((branches, consumed)) = select_branches(body) else {
                out.push_str(&rest[pos..]);
                return;
            };
            let tail = &body[consumed..];
            let selected = arg_index(tail)
                .and_then(|i| args.get(i))
                .and_then(DiagnosticArgument::as_integer)
                .and_then(|n| usize::try_from(n).ok())
                .and_then(|n| branches.get(n));
            if let Some(branch) = selected {
                render_into(out, branch, args, options);
            }
            rest = if arg_index(tail).is_some() { &tail[1..] } else { tail };
        } else if let Some(index) = after.strip_prefix('s').and_then(arg_index) {
            let count = args.get(index).and_then(DiagnosticArgument::as_integer);
            if count != Some(1) {
                out.push('s');
            }
            rest = &after[2..];
        } else {
            out.push('%');
            rest = after;
        }
    }
    out.push_str(rest);
}

#[cfg(test)]
mod tests;
