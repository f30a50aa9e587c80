//! Common trait for the bucket algorithms.
//!
//! Lets callers drive either bucket through one interface, e.g. behind a
//! `Box<dyn Admission>` chosen at runtime.

use std::time::Instant;

use crate::AdmissionResult;

/// Operations shared by [`LeakyBucket`](crate::buckets::LeakyBucket) and
/// [`TokenBucket`](crate::buckets::TokenBucket).
pub trait Admission: Send + Sync {
    /// Attempts to admit a payload of `payload_size` units at `timestamp`.
    ///
    /// For a leaky bucket this is `add`, for a token bucket `take`.
    fn admit_at(&self, payload_size: u64, timestamp: Instant) -> AdmissionResult;

    /// Attempts to admit a payload at [`Instant::now`].
    fn admit(&self, payload_size: u64) -> AdmissionResult {
        self.admit_at(payload_size, Instant::now())
    }

    /// Level recorded by the last operation.
    fn current(&self) -> f64;

    /// Configured capacity.
    fn capacity(&self) -> f64;
}
