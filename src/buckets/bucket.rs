//! Shared skeleton behind [`LeakyBucket`](super::LeakyBucket) and
//! [`TokenBucket`](super::TokenBucket).
//!
//! Both algorithms do the same three things under one lock: bring the level
//! up to date with the elapsed time, check the payload against the capacity,
//! and apply the payload's delta. They differ only in the sign of the
//! time-driven term and in the predicate guarding admission, which is what
//! [`Flow`] captures.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::{AdmissionError, AdmissionResult, ConfigError};

/// Direction in which a bucket's level moves over time.
pub(crate) trait Flow {
    /// Level a freshly (re)initialised bucket starts at.
    fn initial_level(capacity: f64) -> f64;

    /// Level after `delta` units have drained or refilled, clamped to `[0, capacity]`.
    fn advance(level: f64, delta: f64, capacity: f64) -> f64;

    /// Level after admitting `size` units, or the transient rejection.
    ///
    /// Only called once `size` is known to fit within `capacity`.
    fn admit(level: f64, size: u64, capacity: f64, rate: f64) -> Result<f64, AdmissionError>;
}

/// Level drains toward zero; admission adds fill.
pub(crate) struct Drain;

/// Level refills toward capacity; admission consumes tokens.
pub(crate) struct Refill;

impl Flow for Drain {
    #[inline]
    fn initial_level(_capacity: f64) -> f64 {
        0.0
    }

    #[inline]
    fn advance(level: f64, delta: f64, _capacity: f64) -> f64 {
        (level - delta).max(0.0)
    }

    #[inline]
    fn admit(level: f64, size: u64, capacity: f64, rate: f64) -> Result<f64, AdmissionError> {
        let size_f = size as f64;
        if level + size_f > capacity {
            return Err(AdmissionError::InsufficientRoom {
                size,
                room: capacity - level,
                retry_after: wait_for(level + size_f - capacity, rate),
            });
        }
        Ok(level + size_f)
    }
}

impl Flow for Refill {
    #[inline]
    fn initial_level(capacity: f64) -> f64 {
        capacity
    }

    #[inline]
    fn advance(level: f64, delta: f64, capacity: f64) -> f64 {
        (level + delta).min(capacity)
    }

    #[inline]
    fn admit(level: f64, size: u64, _capacity: f64, rate: f64) -> Result<f64, AdmissionError> {
        let size_f = size as f64;
        if size_f > level {
            return Err(AdmissionError::InsufficientTokens {
                size,
                available: level,
                retry_after: wait_for(size_f - level, rate),
            });
        }
        Ok(level - size_f)
    }
}

/// Time needed for `deficit` units to drain or refill at `rate` units per second.
///
/// Rounded up to the next whole nanosecond and never zero, so waiting the
/// returned duration is always enough. Saturates at `u64::MAX` nanoseconds.
fn wait_for(deficit: f64, rate: f64) -> Duration {
    let nanos = (deficit / rate * 1e9).ceil() as u64;
    Duration::from_nanos(nanos.max(1))
}

/// Checks that a capacity/rate pair describes a usable bucket.
pub(crate) fn validate_params(capacity: f64, rate: f64) -> Result<(), ConfigError> {
    if !(capacity.is_finite() && capacity > 0.0) {
        return Err(ConfigError::InvalidCapacity { capacity });
    }
    if !(rate.is_finite() && rate > 0.0) {
        return Err(ConfigError::InvalidRate { rate });
    }
    Ok(())
}

fn assert_params(capacity: f64, rate: f64) {
    assert!(
        capacity.is_finite() && capacity > 0.0,
        "capacity must be a positive finite number"
    );
    assert!(
        rate.is_finite() && rate > 0.0,
        "rate must be a positive finite number"
    );
}

/// Everything the lock protects.
struct BucketState {
    capacity: f64,
    rate: f64,
    level: f64,
    last_observed: Instant,
}

impl BucketState {
    fn fresh<F: Flow>(capacity: f64, rate: f64) -> Self {
        BucketState {
            capacity,
            rate,
            level: F::initial_level(capacity),
            last_observed: Instant::now(),
        }
    }

    /// Applies the drain or refill accumulated since the last observation.
    ///
    /// Timestamps older than `last_observed` count as zero elapsed time and
    /// never move `last_observed` backwards.
    fn catch_up<F: Flow>(&mut self, timestamp: Instant) {
        let elapsed = timestamp.saturating_duration_since(self.last_observed);
        let delta = self.rate * elapsed.as_secs_f64();
        self.level = F::advance(self.level, delta, self.capacity);
        if timestamp > self.last_observed {
            self.last_observed = timestamp;
        }
    }
}

/// A mutex-guarded bucket whose level moves in direction `F`.
pub(crate) struct Bucket<F> {
    state: Mutex<BucketState>,
    _flow: PhantomData<fn() -> F>,
}

impl<F: Flow> Bucket<F> {
    /// # Panics
    ///
    /// Panics if `capacity` or `rate` is not a positive finite number.
    pub(crate) fn new(capacity: f64, rate: f64) -> Self {
        assert_params(capacity, rate);
        Bucket {
            state: Mutex::new(BucketState::fresh::<F>(capacity, rate)),
            _flow: PhantomData,
        }
    }

    pub(crate) fn try_new(capacity: f64, rate: f64) -> Result<Self, ConfigError> {
        validate_params(capacity, rate)?;
        Ok(Bucket {
            state: Mutex::new(BucketState::fresh::<F>(capacity, rate)),
            _flow: PhantomData,
        })
    }

    /// Replaces the parameters and restores the initial level.
    pub(crate) fn reset(&self, capacity: f64, rate: f64) {
        assert_params(capacity, rate);
        *self.lock() = BucketState::fresh::<F>(capacity, rate);
    }

    /// Catches up with `timestamp`, then admits `size` units or rejects them.
    ///
    /// The catch-up is kept even when the payload is rejected.
    pub(crate) fn admit_at(&self, size: u64, timestamp: Instant) -> AdmissionResult {
        let mut state = self.lock();
        state.catch_up::<F>(timestamp);

        if (size as f64) > state.capacity {
            return Err(AdmissionError::PayloadTooLarge {
                size,
                capacity: state.capacity,
            });
        }

        state.level = F::admit(state.level, size, state.capacity, state.rate)?;
        Ok(())
    }

    /// Level as of the last operation, without catching up.
    pub(crate) fn level(&self) -> f64 {
        self.lock().level
    }

    pub(crate) fn capacity(&self) -> f64 {
        self.lock().capacity
    }

    pub(crate) fn rate(&self) -> f64 {
        self.lock().rate
    }

    // The critical section is plain arithmetic and cannot leave the state
    // half-written, so a poisoned lock still guards consistent data.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, BucketState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
