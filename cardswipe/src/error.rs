//! Error types for the cardswipe decoder
//!
//! Defines library error types using thiserror for clear error propagation.
//!
//! Bad reads are not errors: a swipe that fails every decode attempt still
//! produces a [`crate::DecodeResult`] with `bad_read` set. Only precondition
//! violations surface here.

use thiserror::Error;

/// Main error type for the cardswipe library
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value was outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller supplied an empty sample buffer
    #[error("Empty input: decoding requires at least one sample")]
    EmptyInput,
}

/// Convenience Result type using the cardswipe Error
pub type Result<T> = std::result::Result<T, Error>;
