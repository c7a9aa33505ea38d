//! Proof that at least one error diagnostic went through a
//! [`DiagnosticEngine`](crate::DiagnosticEngine).

use std::fmt;

/// Zero-sized token that can only be created once an error was emitted.
///
/// Phases return `Result<T, ErrorGuaranteed>` so that "failed without
/// telling the user why" is unrepresentable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Some proof if `count` errors is non-zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}
