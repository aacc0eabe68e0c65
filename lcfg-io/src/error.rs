//! Error types for LCFG status-file, export, and directory I/O.

use lcfg_core::{LcfgError, ValidationError};
use thiserror::Error;

/// Raised when a status line or key cannot be parsed (spec §4.3, §7).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing '=' separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: component in key {key:?} does not match component {expected:?}")]
    ComponentMismatch {
        line: usize,
        key: String,
        expected: String,
    },

    #[error("line {line}: {source}")]
    Key {
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error("line {line}: {source}")]
    Value {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

/// Top-level error type for `lcfg-io` operations: status file load/save,
/// directory (de)serialisation, and hold-file emission (spec §7).
///
/// Reuses `lcfg_core::LcfgError` for the VALIDATION and CONFLICT kinds, as
/// described in SPEC_FULL.md's "Error handling" section, and adds the
/// PARSE kind plus `std::io::Error` for the IO kind.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Lcfg(#[from] LcfgError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("status directory {path} does not exist")]
    MissingDirectory { path: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for IoError {
    fn from(e: ValidationError) -> Self {
        IoError::Lcfg(LcfgError::from(e))
    }
}

pub type IoResult<T> = Result<T, IoError>;
