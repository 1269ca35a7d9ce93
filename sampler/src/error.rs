//! Error handling.

use num_bigint::BigInt;

use std::{error, fmt, io};

/// Errors that can occur when sampling a random integer.
#[derive(Debug)]
#[non_exhaustive]
pub enum SampleError {
    /// Upper bound of the range is not greater than its lower bound.
    InvalidRange {
        /// Inclusive lower bound of the rejected range.
        low: BigInt,
        /// Exclusive upper bound of the rejected range.
        high: BigInt,
    },

    /// Entropy source could not supply the requested bytes (e.g., it could not be opened,
    /// returned fewer bytes than requested, or failed with an I/O error).
    EntropySource(io::Error),

    /// All draws from the entropy source were outside the range.
    ///
    /// For a uniform source, every draw is accepted with probability greater than 1/2,
    /// so this error almost certainly means that the source is not uniform.
    RetryExhausted {
        /// Number of draws made before giving up.
        attempts: usize,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { low, high } => write!(
                formatter,
                "upper bound must be strictly greater than lower bound (got [{}, {}))",
                low, high
            ),
            Self::EntropySource(_) => formatter.write_str("cannot read entropy"),
            Self::RetryExhausted { attempts } => write!(
                formatter,
                "entropy source did not return a number within the given bounds \
                 (tried {} times)",
                attempts
            ),
        }
    }
}

impl error::Error for SampleError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::EntropySource(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SampleError {
    fn from(err: io::Error) -> Self {
        Self::EntropySource(err)
    }
}

impl SampleError {
    /// Returns `true` if this error was caused by the entropy source, either because
    /// it failed outright or because its output was consistently out of range.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::EntropySource(_) | Self::RetryExhausted { .. })
    }
}
