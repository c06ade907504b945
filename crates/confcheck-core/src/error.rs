//! # Error Types
//!
//! Errors raised by the core crate. Resolution itself never fails: a field
//! that cannot be located yields `None`, not an error. The only fallible
//! surface here is parsing a naming scheme from user input.

use thiserror::Error;

/// Top-level error type for `confcheck-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A scheme name did not match any preset.
    #[error("unknown tag scheme '{name}'; expected one of: {expected}")]
    UnknownScheme {
        /// The name that was supplied.
        name: String,
        /// Comma-separated list of accepted preset names.
        expected: String,
    },
}
