//! Project: GuardBSD Winter Saga version 1.0.0
//! Package: vectorgen
//! Copyright © 2025 Cartesian School. Developed by Siergej Sobolewski.
//! License: BSD-3-Clause
//!
//! Error handling for the trap vector generator.

use core::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Writing the listing failed.
    Io(io::ErrorKind),
    /// Named configuration field is not a usable assembler symbol.
    InvalidSymbol(&'static str),
    /// Named configuration field is not a single directive/mnemonic token.
    InvalidDirective(&'static str),
}

impl Error {
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(kind) => write!(f, "write failed: {}", kind),
            Error::InvalidSymbol(field) => write!(f, "invalid symbol in `{}`", field),
            Error::InvalidDirective(field) => write!(f, "invalid directive in `{}`", field),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.kind())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
