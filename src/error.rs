//! Error type.

use core::fmt::{self, Display};

/// Errors reported at the byte-level API boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A 64-byte point encoding does not decode to a curve point: the
    /// coordinates do not satisfy the curve equation, and the encoding
    /// is not the all-zero encoding of the neutral.
    InvalidPoint,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidPoint => f.write_str("invalid curve point encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
