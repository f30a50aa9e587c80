use std::time::Instant;

use super::bucket::{Bucket, Refill};
use crate::{admission::Admission, AdmissionResult, ConfigError};

/// Thread-safe token bucket.
///
/// The bucket holds up to `capacity` tokens and gains `refill_rate` tokens per
/// second. Taking a payload consumes one token per unit of its size; if there
/// are not enough tokens, the payload is rejected. Unused tokens accumulate up
/// to the capacity, which allows bursts while keeping the average rate at the
/// refill rate.
///
/// # Algorithm Behavior
///
/// - The bucket starts full with `capacity` tokens.
/// - Refill is computed lazily from the elapsed time whenever [`take`](Self::take) runs.
/// - A payload larger than the capacity is rejected permanently.
/// - A payload larger than the tokens on hand is rejected transiently.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use bucket_guard_core::buckets::TokenBucket;
///
/// // Holds 50 tokens, refills 10 tokens per second
/// let bucket = TokenBucket::new(50.0, 10.0);
/// let t0 = Instant::now();
///
/// assert_eq!(bucket.take(40, t0), Ok(()));
/// assert!(bucket.take(40, t0).is_err());
///
/// // Three seconds later 30 tokens have been added
/// assert_eq!(bucket.take(40, t0 + Duration::from_secs(3)), Ok(()));
/// assert_eq!(bucket.current(), 0.0);
/// ```
pub struct TokenBucket {
    inner: Bucket<Refill>,
}

impl TokenBucket {
    /// Creates a full token bucket.
    ///
    /// # Parameters
    ///
    /// * `capacity` - Maximum number of tokens the bucket can hold.
    /// * `refill_rate` - Tokens added per second.
    ///
    /// # Panics
    ///
    /// Panics if either parameter is zero, negative, NaN or infinite.
    pub fn new(capacity: f64, refill_rate: f64) -> Self {
        TokenBucket {
            inner: Bucket::new(capacity, refill_rate),
        }
    }

    /// Creates a full token bucket, rejecting invalid parameters.
    pub fn try_new(capacity: f64, refill_rate: f64) -> Result<Self, ConfigError> {
        Ok(TokenBucket {
            inner: Bucket::try_new(capacity, refill_rate)?,
        })
    }

    /// Resets the bucket to full with new parameters.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`new`](Self::new).
    pub fn init(&self, capacity: f64, refill_rate: f64) {
        self.inner.reset(capacity, refill_rate);
    }

    /// Attempts to take `payload_size` tokens at `timestamp`.
    ///
    /// Refills the bucket for the time elapsed since the last operation, then
    /// checks whether enough tokens are available. The refill is kept even if
    /// the payload is rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The tokens were consumed.
    /// * `Err(AdmissionError::PayloadTooLarge)` - The payload exceeds the capacity and can never be served.
    /// * `Err(AdmissionError::InsufficientTokens)` - Not enough tokens yet; retry after `retry_after`.
    #[inline]
    pub fn take(&self, payload_size: u64, timestamp: Instant) -> AdmissionResult {
        self.inner.admit_at(payload_size, timestamp)
    }

    /// Attempts to take tokens at [`Instant::now`].
    #[inline]
    pub fn take_now(&self, payload_size: u64) -> AdmissionResult {
        self.take(payload_size, Instant::now())
    }

    /// Gets the token count recorded by the last operation, without refilling.
    #[inline]
    pub fn current(&self) -> f64 {
        self.inner.level()
    }

    /// Maximum number of tokens the bucket can hold.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.inner.capacity()
    }

    /// Tokens added per second.
    #[inline]
    pub fn refill_rate(&self) -> f64 {
        self.inner.rate()
    }
}

impl Admission for TokenBucket {
    #[inline]
    fn admit_at(&self, payload_size: u64, timestamp: Instant) -> AdmissionResult {
        self.take(payload_size, timestamp)
    }

    #[inline]
    fn current(&self) -> f64 {
        self.current()
    }

    #[inline]
    fn capacity(&self) -> f64 {
        self.capacity()
    }
}
