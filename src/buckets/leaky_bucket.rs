use std::time::Instant;

use super::bucket::{Bucket, Drain};
use crate::{admission::Admission, AdmissionResult, ConfigError};

/// Thread-safe leaky bucket.
///
/// The bucket is a reservoir of fixed capacity that drains continuously at
/// `leak_rate` units per second. Admitting a payload adds its size to the
/// reservoir; if that would overflow the capacity, the payload is rejected.
/// This smooths bursty input down to the leak rate.
///
/// # Algorithm Behavior
///
/// - The bucket starts empty.
/// - Draining is computed lazily from the elapsed time whenever [`add`](Self::add) runs.
/// - A payload larger than the capacity is rejected permanently.
/// - A payload that does not fit yet is rejected transiently; it will fit once
///   enough has drained.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use bucket_guard_core::buckets::LeakyBucket;
///
/// // Holds 100 units, drains 20 units per second
/// let bucket = LeakyBucket::new(100.0, 20.0);
/// let t0 = Instant::now();
///
/// assert_eq!(bucket.add(90, t0), Ok(()));
/// assert!(bucket.add(20, t0).is_err());
///
/// // Half a second later 10 units have drained
/// assert_eq!(bucket.add(20, t0 + Duration::from_millis(500)), Ok(()));
/// assert_eq!(bucket.current(), 100.0);
/// ```
pub struct LeakyBucket {
    inner: Bucket<Drain>,
}

impl LeakyBucket {
    /// Creates an empty leaky bucket.
    ///
    /// # Parameters
    ///
    /// * `capacity` - Maximum fill the bucket can hold.
    /// * `leak_rate` - Units drained per second.
    ///
    /// # Panics
    ///
    /// Panics if either parameter is zero, negative, NaN or infinite.
    /// Use [`try_new`](Self::try_new) for unvalidated input.
    pub fn new(capacity: f64, leak_rate: f64) -> Self {
        LeakyBucket {
            inner: Bucket::new(capacity, leak_rate),
        }
    }

    /// Creates an empty leaky bucket, rejecting invalid parameters.
    ///
    /// ```rust
    /// use bucket_guard_core::{buckets::LeakyBucket, ConfigError};
    ///
    /// assert!(LeakyBucket::try_new(100.0, 20.0).is_ok());
    /// assert!(matches!(
    ///     LeakyBucket::try_new(100.0, 0.0),
    ///     Err(ConfigError::InvalidRate { .. })
    /// ));
    /// ```
    pub fn try_new(capacity: f64, leak_rate: f64) -> Result<Self, ConfigError> {
        Ok(LeakyBucket {
            inner: Bucket::try_new(capacity, leak_rate)?,
        })
    }

    /// Resets the bucket to empty with new parameters.
    ///
    /// Any fill and elapsed time accumulated before the call are discarded.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`new`](Self::new).
    pub fn init(&self, capacity: f64, leak_rate: f64) {
        self.inner.reset(capacity, leak_rate);
    }

    /// Attempts to add a payload of `payload_size` units at `timestamp`.
    ///
    /// Drains the bucket for the time elapsed since the last operation, then
    /// checks whether the payload fits. The drain is kept even if the payload
    /// is rejected.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The payload was admitted and its size added to the level.
    /// * `Err(AdmissionError::PayloadTooLarge)` - The payload exceeds the capacity and can never fit.
    /// * `Err(AdmissionError::InsufficientRoom)` - The payload does not fit yet; retry after `retry_after`.
    #[inline]
    pub fn add(&self, payload_size: u64, timestamp: Instant) -> AdmissionResult {
        self.inner.admit_at(payload_size, timestamp)
    }

    /// Attempts to add a payload at [`Instant::now`].
    #[inline]
    pub fn add_now(&self, payload_size: u64) -> AdmissionResult {
        self.add(payload_size, Instant::now())
    }

    /// Gets the fill level recorded by the last operation.
    ///
    /// This does not drain the bucket for time elapsed since then. Call it right
    /// after [`add`](Self::add) for an up-to-date value.
    #[inline]
    pub fn current(&self) -> f64 {
        self.inner.level()
    }

    /// Maximum fill the bucket can hold.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.inner.capacity()
    }

    /// Units drained per second.
    #[inline]
    pub fn leak_rate(&self) -> f64 {
        self.inner.rate()
    }
}

impl Admission for LeakyBucket {
    #[inline]
    fn admit_at(&self, payload_size: u64, timestamp: Instant) -> AdmissionResult {
        self.add(payload_size, timestamp)
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
