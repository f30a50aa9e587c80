//! error.rs
//! Admission and configuration error types shared by both buckets.

use std::time::Duration;

/// Reason a payload was not admitted into a bucket.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AdmissionError {
    /// The payload is larger than the bucket's total capacity.
    ///
    /// This request can never succeed, no matter how long the caller waits.
    /// The payload must be split or dropped.
    #[error("payload too large for bucket, size: {size}, max capacity: {capacity:.3}")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        size: u64,
        /// Configured capacity of the bucket.
        capacity: f64,
    },

    /// The leaky bucket is too full to hold the payload right now.
    #[error("no room left for payload in bucket, size: {size}, room left: {room:.3}, retry after {retry_after:?}")]
    InsufficientRoom {
        /// Size of the rejected payload.
        size: u64,
        /// Free space in the bucket when the payload was rejected.
        room: f64,
        /// Time until enough fill has drained for the payload to fit.
        retry_after: Duration,
    },

    /// The token bucket holds fewer tokens than the payload needs right now.
    #[error("not enough tokens for payload, size: {size}, tokens available: {available:.3}, retry after {retry_after:?}")]
    InsufficientTokens {
        /// Size of the rejected payload.
        size: u64,
        /// Tokens in the bucket when the payload was rejected.
        available: f64,
        /// Time until enough tokens have accrued for the payload.
        retry_after: Duration,
    },
}

impl AdmissionError {
    /// Returns `true` if retrying the same payload later may succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        !self.is_permanent()
    }

    /// Returns `true` if the payload can never be admitted by this bucket.
    #[inline]
    pub fn is_permanent(&self) -> bool {
        matches!(self, AdmissionError::PayloadTooLarge { .. })
    }

    /// Suggested wait before retrying, or `None` for permanent rejections.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AdmissionError::PayloadTooLarge { .. } => None,
            AdmissionError::InsufficientRoom { retry_after, .. }
            | AdmissionError::InsufficientTokens { retry_after, .. } => Some(*retry_after),
        }
    }
}

/// Result type for admission operations.
pub type AdmissionResult = Result<(), AdmissionError>;

/// Errors raised when a bucket is configured with unusable parameters.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Capacity is zero, negative, NaN or infinite.
    #[error("invalid capacity: {capacity}. Capacity must be finite and positive.")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: f64,
    },

    /// Leak or refill rate is zero, negative, NaN or infinite.
    #[error("invalid rate: {rate}. Rate must be finite and positive.")]
    InvalidRate {
        /// The rejected rate, in units per second.
        rate: f64,
    },
}
