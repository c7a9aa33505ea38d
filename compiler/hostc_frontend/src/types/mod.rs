//! Semantic types of the checked language.

use std::fmt;

/// A resolved type.
///
/// `Error` stands in for anything that already failed to check and is
/// compatible with every type, so one mistake is reported once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ty {
    Int,
    String,
    Bool,
    Void,
    Any,
    Function(&'static FunctionSig),
    Error,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FunctionSig {
    pub params: &'static [Ty],
    pub result: Ty,
}

impl Ty {
    /// Whether a value of type `value` may be used where `self` is expected.
    pub fn accepts(self, value: Ty) -> bool {
        matches!(self, Ty::Any | Ty::Error) || value == Ty::Error || self == value
    }

    pub fn is_error(self) -> bool {
        self == Ty::Error
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => f.write_str("Int"),
            Ty::String => f.write_str("String"),
            Ty::Bool => f.write_str("Bool"),
            Ty::Void => f.write_str("()"),
            Ty::Any => f.write_str("Any"),
            Ty::Error => f.write_str("<<error type>>"),
            Ty::Function(sig) => {
                f.write_str("(")?;
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {}", sig.result)
            }
        }
    }
}

/// A type as the user spelled it: an alias keeps its own name so messages
/// can say `'Meters' (aka 'Int')`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpelledTy {
    pub ty: Ty,
    pub alias: Option<String>,
}

impl SpelledTy {
    pub fn plain(ty: Ty) -> Self {
        SpelledTy { ty, alias: None }
    }
}

impl From<Ty> for SpelledTy {
    fn from(ty: Ty) -> Self {
        SpelledTy::plain(ty)
    }
}

#[cfg(test)]
mod tests;
