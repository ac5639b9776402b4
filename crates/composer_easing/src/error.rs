// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised when combining rate functions.

/// Error type for rate-function combinators
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EasingError {
    /// Nothing to combine
    #[error("Cannot {0} an empty list of rate functions")]
    Empty(&'static str),

    /// Weight or duration list does not match the function list
    #[error("Expected {expected} weights, got {actual}")]
    WeightCountMismatch {
        /// Number of functions
        expected: usize,
        /// Number of weights supplied
        actual: usize,
    },

    /// Weights or durations cannot be normalized
    #[error("Weights must sum to a positive finite value, got {0}")]
    InvalidWeightSum(f64),

    /// A single weight or duration is negative or not finite
    #[error("Invalid weight {0}")]
    InvalidWeight(f64),
}

/// Result type for easing operations
pub type Result<T> = std::result::Result<T, EasingError>;
