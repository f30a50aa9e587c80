//! Serializable bucket configurations.
//!
//! Each config converts into its bucket through [`TryFrom`], validating the
//! parameters on the way.

use serde::{Deserialize, Serialize};

use crate::buckets::bucket::validate_params;
use crate::buckets::{LeakyBucket, TokenBucket};
use crate::ConfigError;

const DEFAULT_CAPACITY: f64 = 100.0;
const DEFAULT_RATE: f64 = 20.0;

/// Configuration for a [`LeakyBucket`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeakyBucketConfig {
    /// Maximum fill the bucket can hold.
    pub capacity: f64,
    /// Units drained per second.
    pub leak_rate: f64,
}

impl LeakyBucketConfig {
    /// Creates a new configuration instance.
    pub fn new(capacity: f64, leak_rate: f64) -> Self {
        Self { capacity, leak_rate }
    }

    /// Checks that both parameters are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_params(self.capacity, self.leak_rate)
    }
}

impl Default for LeakyBucketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_RATE)
    }
}

impl TryFrom<LeakyBucketConfig> for LeakyBucket {
    type Error = ConfigError;

    /// Builds an empty bucket from a validated config.
    ///
    /// ```
    /// use bucket_guard_core::buckets::LeakyBucket;
    /// use bucket_guard_core::config::LeakyBucketConfig;
    ///
    /// let bucket = LeakyBucket::try_from(LeakyBucketConfig::new(100.0, 20.0)).unwrap();
    /// assert_eq!(bucket.capacity(), 100.0);
    /// ```
    fn try_from(config: LeakyBucketConfig) -> Result<Self, Self::Error> {
        LeakyBucket::try_new(config.capacity, config.leak_rate)
    }
}

/// Configuration for a [`TokenBucket`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBucketConfig {
    /// Maximum number of tokens the bucket can hold.
    pub capacity: f64,
    /// Tokens added per second.
    pub refill_rate: f64,
}

impl TokenBucketConfig {
    /// Creates a new configuration instance.
    pub fn new(capacity: f64, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill_rate,
        }
    }

    /// Checks that both parameters are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_params(self.capacity, self.refill_rate)
    }
}

impl Default for TokenBucketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_RATE)
    }
}

impl TryFrom<TokenBucketConfig> for TokenBucket {
    type Error = ConfigError;

    /// Builds a full bucket from a validated config.
    ///
    /// ```
    /// use bucket_guard_core::buckets::TokenBucket;
    /// use bucket_guard_core::config::TokenBucketConfig;
    ///
    /// let bucket: TokenBucket = TokenBucketConfig::new(50.0, 10.0).try_into().unwrap();
    /// assert_eq!(bucket.current(), 50.0);
    /// ```
    fn try_from(config: TokenBucketConfig) -> Result<Self, Self::Error> {
        TokenBucket::try_new(config.capacity, config.refill_rate)
    }
}
