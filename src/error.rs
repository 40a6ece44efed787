//! Error types for u-brkga.
//!
//! [`DecodeError`] is what a [`Decoder`](crate::brkga::Decoder) reports when
//! it rejects a chromosome. [`BrkgaError`] is the error surfaced by every
//! fallible engine operation.

use thiserror::Error;

/// Error reported by a decoder for a chromosome it cannot score.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// The chromosome does not have the length the decoder requires.
    #[error("chromosome length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The decoder produced a NaN fitness.
    #[error("decoder returned a NaN fitness")]
    NotANumber,

    /// Problem-specific rejection.
    #[error("chromosome rejected: {0}")]
    Rejected(String),
}

impl DecodeError {
    /// Fails with [`DecodeError::LengthMismatch`] unless `keys` has exactly
    /// `expected` genes.
    ///
    /// ```
    /// use u_brkga::DecodeError;
    ///
    /// assert!(DecodeError::check_length(2, &[0.1, 0.2]).is_ok());
    /// assert_eq!(
    ///     DecodeError::check_length(2, &[0.1]),
    ///     Err(DecodeError::LengthMismatch { expected: 2, actual: 1 })
    /// );
    /// ```
    pub fn check_length(expected: usize, keys: &[f64]) -> std::result::Result<(), DecodeError> {
        if keys.len() == expected {
            Ok(())
        } else {
            Err(DecodeError::LengthMismatch {
                expected,
                actual: keys.len(),
            })
        }
    }
}

/// Top-level error type for BRKGA operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BrkgaError {
    /// Invalid parameter combination, detected before any work is done.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A decoder rejected a chromosome; the generation that triggered it
    /// was discarded.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The optimizer currently holds no population.
    #[error("population is empty")]
    EmptyPopulation,

    /// A caller-supplied chromosome is malformed.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrkgaError>;
