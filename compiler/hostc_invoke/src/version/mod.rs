//! API generation numbers.
//!
//! A minor bump adds surface (new accessors, new fields at the end of a
//! struct); a major bump changes layouts or semantics. Callers pin a major
//! version and require a minimum minor.

use std::fmt;

/// A `major.minor` API version.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        ApiVersion { major, minor }
    }

    /// Whether an implementation at `self` satisfies a caller that was
    /// built against `required`.
    pub const fn is_compatible_with(self, required: ApiVersion) -> bool {
        self.major == required.major && self.minor >= required.minor
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Version of the Rust surface of this crate.
pub const CURRENT: ApiVersion = ApiVersion::new(1, 0);
