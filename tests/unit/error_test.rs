//! Tests for error types

use prometheus_elastic_pool::{ConfigError, PoolError, ScheduleError};

#[test]
fn test_non_positive_pool_size_error() {
    let err = ConfigError::NonPositivePoolSize;
    assert_eq!(format!("{}", err), "pool size must be a positive integer");
}

#[test]
fn test_invalid_env_error() {
    let err = ConfigError::InvalidEnv {
        key: "ELASTIC_POOL_SIZE".to_string(),
        value: "four".to_string(),
    };
    assert_eq!(format!("{}", err), "invalid value `four` for ELASTIC_POOL_SIZE");
}

#[test]
fn test_spawn_error() {
    let err = PoolError::from(std::io::Error::other("no threads left"));
    assert_eq!(format!("{}", err), "failed to spawn thread: no threads left");
}

#[test]
fn test_schedule_errors_are_distinct() {
    assert_ne!(ScheduleError::Closed, ScheduleError::Full);
}
