//! Typed arguments substituted into diagnostic format strings.
//!
//! Arguments stay typed until rendering so that a host can choose how
//! identifiers and types are quoted, and whether a type alias is expanded
//! ("aka") in the message.

use std::fmt;

/// A type named in a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeArg {
    /// Spelling as written by the user (may be an alias).
    pub name: String,
    /// Canonical type when `name` is an alias.
    pub aka: Option<String>,
    /// Declaration whose opaque result type this is, if any.
    pub opaque_origin: Option<String>,
}

impl TypeArg {
    /// A plain nominal type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeArg {
            name: name.into(),
            aka: None,
            opaque_origin: None,
        }
    }

    /// An alias together with the type it stands for.
    pub fn alias(name: impl Into<String>, aka: impl Into<String>) -> Self {
        TypeArg {
            name: name.into(),
            aka: Some(aka.into()),
            opaque_origin: None,
        }
    }

    /// The opaque result type of `origin`.
    pub fn opaque(name: impl Into<String>, origin: impl Into<String>) -> Self {
        TypeArg {
            name: name.into(),
            aka: None,
            opaque_origin: Some(origin.into()),
        }
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One format argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticArgument {
    /// Inserted verbatim.
    String(String),
    /// A name from the source; quoted when rendered.
    Identifier(String),
    /// A type; quoted, with alias and opaque decoration.
    Type(TypeArg),
    /// An integer, also used to drive `%select` and `%s`.
    Integer(i64),
}

impl DiagnosticArgument {
    /// Create an identifier argument.
    pub fn identifier(name: impl Into<String>) -> Self {
        DiagnosticArgument::Identifier(name.into())
    }

    /// Create a verbatim string argument.
    pub fn string(text: impl Into<String>) -> Self {
        DiagnosticArgument::String(text.into())
    }

    /// The integer value, if this is an integer argument.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DiagnosticArgument::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<TypeArg> for DiagnosticArgument {
    fn from(ty: TypeArg) -> Self {
        DiagnosticArgument::Type(ty)
    }
}

impl From<i64> for DiagnosticArgument {
    fn from(n: i64) -> Self {
        DiagnosticArgument::Integer(n)
    }
}

impl From<usize> for DiagnosticArgument {
    fn from(n: usize) -> Self {
        DiagnosticArgument::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}
