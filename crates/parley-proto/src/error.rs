//! Error types for harness configuration.
//!
//! These are programmer errors raised synchronously at the offending call,
//! before any conversation step executes. Expectation violations travel as
//! [`Failure`](crate::Failure) descriptors instead.

use thiserror::Error;

/// Errors raised while configuring the harness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Locale must not be empty")]
    EmptyLocale,

    #[error("Unknown feature toggle: {0}")]
    UnknownFeature(String),

    #[error("Missing required configuration: {0}")]
    MissingField(&'static str),

    #[error("Conflicting expectations declared on one step: {0}")]
    ConflictingExpectations(&'static str),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
