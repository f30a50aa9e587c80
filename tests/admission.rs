use std::time::{Duration, Instant};

use bucket_guard_core::buckets::{LeakyBucket, TokenBucket};
use bucket_guard_core::{Admission, AdmissionError};

fn boxed_leaky(capacity: f64, rate: f64) -> Box<dyn Admission> {
    Box::new(LeakyBucket::new(capacity, rate))
}

fn boxed_token(capacity: f64, rate: f64) -> Box<dyn Admission> {
    Box::new(TokenBucket::new(capacity, rate))
}

#[test]
fn test_trait_object_delegates_to_leaky_add() {
    let bucket = boxed_leaky(100.0, 20.0);
    let t0 = Instant::now();

    assert_eq!(bucket.admit_at(90, t0), Ok(()));
    assert_eq!(bucket.current(), 90.0);
    assert!(matches!(
        bucket.admit_at(20, t0),
        Err(AdmissionError::InsufficientRoom { .. })
    ));
    assert_eq!(bucket.admit_at(20, t0 + Duration::from_millis(500)), Ok(()));
    assert_eq!(bucket.current(), 100.0);
    assert_eq!(bucket.capacity(), 100.0);
}

#[test]
fn test_trait_object_delegates_to_token_take() {
    let bucket = boxed_token(50.0, 10.0);
    let t0 = Instant::now();

    assert_eq!(bucket.current(), 50.0);
    assert_eq!(bucket.admit_at(40, t0), Ok(()));
    assert!(matches!(
        bucket.admit_at(40, t0),
        Err(AdmissionError::InsufficientTokens { .. })
    ));
    assert_eq!(bucket.admit_at(40, t0 + Duration::from_secs(3)), Ok(()));
    assert_eq!(bucket.current(), 0.0);
}

#[test]
fn test_permanent_rejection_for_both_algorithms() {
    let buckets: Vec<(Box<dyn Admission>, &str)> = vec![
        (boxed_leaky(100.0, 20.0), "leaky"),
        (boxed_token(100.0, 20.0), "token"),
    ];

    for (bucket, name) in buckets.iter() {
        let err = bucket.admit(150).unwrap_err();
        assert!(
            matches!(err, AdmissionError::PayloadTooLarge { size: 150, .. }),
            "'{}' should reject 150 permanently, got {:?}",
            name,
            err
        );
    }
}

#[test]
fn test_symmetric_shapes() {
    // Leaky starts empty and fills; token starts full and empties.
    let leaky = boxed_leaky(10.0, 1.0);
    let token = boxed_token(10.0, 1.0);
    let t0 = Instant::now();

    assert_eq!(leaky.current(), 0.0);
    assert_eq!(token.current(), 10.0);

    assert_eq!(leaky.admit_at(10, t0), Ok(()));
    assert_eq!(token.admit_at(10, t0), Ok(()));

    assert_eq!(leaky.current(), 10.0);
    assert_eq!(token.current(), 0.0);

    assert!(leaky.admit_at(1, t0).unwrap_err().is_transient());
    assert!(token.admit_at(1, t0).unwrap_err().is_transient());
}
