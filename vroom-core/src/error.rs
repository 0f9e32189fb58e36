#[cfg(test)]
#[path = "../tests/unit/error_test.rs"]
mod error_test;

use std::fmt;

/// An error type shared by all solving stages. Data problems are rejected before construction
/// starts, missing routing data before the solver starts; an internal error signals a bug, not
/// a property of the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Malformed or inconsistent problem definition.
    Input(String),
    /// Missing or unusable travel matrix data.
    Routing(String),
    /// An invariant violation inside the solver.
    Internal(String),
}

impl Error {
    /// Returns the process exit code associated with the error kind.
    pub fn code(&self) -> i32 {
        match self {
            Error::Internal(_) => 1,
            Error::Input(_) => 2,
            Error::Routing(_) => 3,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(msg) => write!(f, "input error: {msg}"),
            Error::Routing(msg) => write!(f, "routing error: {msg}"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
