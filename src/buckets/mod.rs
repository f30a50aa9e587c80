//! Bucket algorithm implementations.
//!
//! | Algorithm | Starts | Over time | Admission | Limits |
//! |-----------|--------|-----------|-----------|--------|
//! | Leaky Bucket | empty | drains toward 0 | adds fill | bursty input |
//! | Token Bucket | full | refills toward capacity | consumes tokens | bursty consumption |
//!
//! # Thread Safety
//!
//! Each bucket serializes its operations through an internal mutex. Callers
//! block only while another operation on the same bucket is in progress.

pub(crate) mod bucket;

pub mod leaky_bucket;
pub use leaky_bucket::LeakyBucket;

pub mod token_bucket;
pub use token_bucket::TokenBucket;
