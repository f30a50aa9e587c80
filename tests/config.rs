use bucket_guard_core::buckets::{LeakyBucket, TokenBucket};
use bucket_guard_core::config::{LeakyBucketConfig, TokenBucketConfig};
use bucket_guard_core::ConfigError;

#[test]
fn test_defaults_match_demo() {
    assert_eq!(LeakyBucketConfig::default(), LeakyBucketConfig::new(100.0, 20.0));
    assert_eq!(TokenBucketConfig::default(), TokenBucketConfig::new(100.0, 20.0));
}

#[test]
fn test_leaky_config_into_bucket() {
    let bucket = LeakyBucket::try_from(LeakyBucketConfig::new(64.0, 8.0)).unwrap();
    assert_eq!(bucket.capacity(), 64.0);
    assert_eq!(bucket.leak_rate(), 8.0);
    assert_eq!(bucket.current(), 0.0);
}

#[test]
fn test_token_config_into_bucket() {
    let bucket: TokenBucket = TokenBucketConfig::new(64.0, 8.0).try_into().unwrap();
    assert_eq!(bucket.capacity(), 64.0);
    assert_eq!(bucket.refill_rate(), 8.0);
    assert_eq!(bucket.current(), 64.0);
}

#[test]
fn test_invalid_configs_rejected() {
    assert_eq!(
        LeakyBucketConfig::new(0.0, 8.0).validate(),
        Err(ConfigError::InvalidCapacity { capacity: 0.0 })
    );
    assert_eq!(
        TokenBucketConfig::new(10.0, -2.0).validate(),
        Err(ConfigError::InvalidRate { rate: -2.0 })
    );
    assert!(LeakyBucket::try_from(LeakyBucketConfig::new(f64::INFINITY, 1.0)).is_err());
    assert!(TokenBucket::try_from(TokenBucketConfig::new(1.0, 0.0)).is_err());
}

#[test]
fn test_config_error_messages() {
    let err = ConfigError::InvalidRate { rate: 0.0 };
    assert_eq!(err.to_string(), "invalid rate: 0. Rate must be finite and positive.");
}

#[test]
fn test_config_serde() {
    let config: LeakyBucketConfig =
        serde_json::from_str(r#"{ "capacity": 100.0, "leak_rate": 20.0 }"#).unwrap();
    assert_eq!(config, LeakyBucketConfig::new(100.0, 20.0));

    let json = serde_json::to_string(&TokenBucketConfig::new(50.0, 10.0)).unwrap();
    assert_eq!(json, r#"{"capacity":50.0,"refill_rate":10.0}"#);
}
