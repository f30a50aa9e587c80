//! Thread-safe leaky bucket and token bucket admission control.
//!
//! Both buckets decide whether a payload of a given size may enter a
//! downstream system at a given instant. State is updated lazily: there are no
//! background timers, every operation first accounts for the time elapsed
//! since the previous one.
//!
//! # Quick Start
//!
//! ```rust
//! use bucket_guard_core::buckets::TokenBucket;
//!
//! // 100 tokens, refilling at 20 tokens per second
//! let bucket = TokenBucket::new(100.0, 20.0);
//!
//! match bucket.take_now(30) {
//!     Ok(()) => println!("payload admitted"),
//!     Err(e) if e.is_transient() => println!("retry in {:?}", e.retry_after()),
//!     Err(e) => println!("payload rejected: {}", e),
//! }
//! ```
//!
//! # Available Algorithms
//!
//! ## [Leaky Bucket](buckets::LeakyBucket)
//! A reservoir that drains at a constant rate; payloads add fill:
//! ```rust
//! # use bucket_guard_core::buckets::LeakyBucket;
//! let bucket = LeakyBucket::new(100.0, 20.0); // drains 20 units per second
//! assert_eq!(bucket.current(), 0.0);
//! ```
//!
//! ## [Token Bucket](buckets::TokenBucket)
//! A pool of tokens refilled at a constant rate; payloads consume tokens:
//! ```rust
//! # use bucket_guard_core::buckets::TokenBucket;
//! let bucket = TokenBucket::new(100.0, 20.0); // adds 20 tokens per second
//! assert_eq!(bucket.current(), 100.0);
//! ```
//!
//! # Core Concepts
//!
//! ## Time Representation
//! Timestamps are [`std::time::Instant`] values supplied by the caller. A
//! timestamp older than the bucket's last observation counts as zero elapsed
//! time.
//!
//! ## Error Handling
//! Admission returns [`AdmissionResult`], which on failure carries an
//! [`AdmissionError`]:
//! - **[`PayloadTooLarge`](AdmissionError::PayloadTooLarge)** - permanent, the payload exceeds the capacity
//! - **[`InsufficientRoom`](AdmissionError::InsufficientRoom)** - transient, the leaky bucket is too full
//! - **[`InsufficientTokens`](AdmissionError::InsufficientTokens)** - transient, the token bucket is too empty
//!
//! The crate never retries, backs off or logs on its own.
//!
//! ## Thread Safety
//! Buckets are `Send + Sync`. Each operation runs under the bucket's mutex, so
//! concurrent callers are serialized and the level stays within
//! `[0, capacity]` whatever the interleaving.

pub mod admission;
pub mod buckets;
pub mod config;
pub mod error;

pub use admission::Admission;
pub use error::{AdmissionError, AdmissionResult, ConfigError};
