//! Error types for LCFG core operations

use thiserror::Error;

/// Errors raised while validating or mutating a single resource attribute.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },

    #[error("invalid value for type {type_name}: {value:?}")]
    InvalidValue { type_name: &'static str, value: String },

    #[error("invalid type name: {name:?}")]
    InvalidType { name: String },

    #[error("invalid priority: {value:?}")]
    InvalidPriority { value: String },

    #[error("invalid tag: {name:?}")]
    InvalidTag { name: String },

    #[error("invalid template: {reason}")]
    InvalidTemplate { reason: String },

    #[error("cannot change type of {name}: current value {value:?} does not validate under {new_type}")]
    TypeChangeRejected {
        name: String,
        value: String,
        new_type: &'static str,
    },

    #[error("malformed status key {key:?}: {reason}")]
    BadKey { key: String, reason: &'static str },
}

/// Raised when a resource-level merge cannot be resolved automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("merge conflict on resource {name:?}: equal priority {priority} but values differ ({old_value:?} vs {new_value:?})")]
pub struct MergeError {
    pub name: String,
    pub priority: i64,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Top-level error type for the LCFG core engine.
///
/// `lcfg-core` itself does no I/O and never parses untrusted text, so this
/// only aggregates the two kinds that arise from in-memory mutation
/// (VALIDATION, CONFLICT per spec §7). The sibling `lcfg-io` crate defines
/// its own `IoError`, wrapping this plus its own `ParseError` and
/// `std::io::Error` for the IO kind.
#[derive(Debug, Error)]
pub enum LcfgError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Result alias used throughout the engine.
pub type LcfgResult<T> = Result<T, LcfgError>;
