//! Tests for configuration validation

use prometheus_elastic_pool::config::pool::{
    ENV_POOL_CAPACITY, ENV_POOL_SIZE, ENV_QUEUE_SIZE, ENV_STACK_SIZE,
};
use prometheus_elastic_pool::{ConfigError, PoolConfig};

#[test]
fn test_pool_config_validation() {
    let valid = PoolConfig::new(2).with_pool_capacity(4).with_queue_size(8);
    let limits = valid.validate().expect("valid config");
    assert_eq!(limits.pool_size, 2);
    assert_eq!(limits.capacity.map(|c| c.get()), Some(4));
    assert_eq!(limits.queue_size, 8);
}

#[test]
fn test_pool_config_invalid_pool_size() {
    assert_eq!(
        PoolConfig::new(0).validate(),
        Err(ConfigError::NonPositivePoolSize)
    );
    assert_eq!(
        PoolConfig::new(-3).validate(),
        Err(ConfigError::NonPositivePoolSize)
    );
}

#[test]
fn test_pool_config_invalid_queue_size() {
    assert_eq!(
        PoolConfig::new(1).with_queue_size(-1).validate(),
        Err(ConfigError::NegativeQueueSize)
    );
}

#[test]
fn test_pool_config_invalid_capacity() {
    assert_eq!(
        PoolConfig::new(1).with_pool_capacity(-1).validate(),
        Err(ConfigError::NegativePoolCapacity)
    );
    assert_eq!(
        PoolConfig::new(3).with_pool_capacity(2).validate(),
        Err(ConfigError::IllegalPoolCapacity)
    );
}

#[test]
fn test_pool_size_checked_before_queue_size() {
    let cfg = PoolConfig::new(0).with_queue_size(-1).with_pool_capacity(-1);
    assert_eq!(cfg.validate(), Err(ConfigError::NonPositivePoolSize));

    let cfg = PoolConfig::new(1).with_queue_size(-1).with_pool_capacity(-1);
    assert_eq!(cfg.validate(), Err(ConfigError::NegativeQueueSize));
}

#[test]
fn test_capacity_equal_to_pool_size_is_valid() {
    assert!(PoolConfig::new(2).with_pool_capacity(2).validate().is_ok());
}

#[test]
fn test_pool_config_from_json() {
    let json = r#"{
        "pool_size": 2,
        "pool_capacity": 4,
        "queue_size": 16
    }"#;

    let config = PoolConfig::from_json_str(json).expect("parse");
    assert_eq!(config.pool_size, 2);
    assert_eq!(config.pool_capacity, 4);
    assert_eq!(config.queue_size, 16);
    assert_eq!(config.thread_stack_size, None);
}

#[test]
fn test_pool_config_from_json_defaults_optional_fields() {
    let config = PoolConfig::from_json_str(r#"{ "pool_size": 1 }"#).expect("parse");
    assert_eq!(config, PoolConfig::new(1));
}

#[test]
fn test_pool_config_from_json_rejects_invalid() {
    let err = PoolConfig::from_json_str(r#"{ "pool_size": 2, "pool_capacity": 1 }"#).unwrap_err();
    assert_eq!(err, ConfigError::IllegalPoolCapacity);

    let err = PoolConfig::from_json_str("not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

// The only test touching these variables, so it cannot race with another.
#[test]
fn test_pool_config_from_env() {
    std::env::set_var(ENV_POOL_SIZE, "3");
    std::env::set_var(ENV_POOL_CAPACITY, "6");
    std::env::set_var(ENV_QUEUE_SIZE, "12");
    std::env::set_var(ENV_STACK_SIZE, "262144");

    let config = PoolConfig::from_env().expect("env config");
    assert_eq!(config.pool_size, 3);
    assert_eq!(config.pool_capacity, 6);
    assert_eq!(config.queue_size, 12);
    assert_eq!(config.thread_stack_size, Some(262_144));

    std::env::set_var(ENV_QUEUE_SIZE, "lots");
    let err = PoolConfig::from_env().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidEnv {
            key: ENV_QUEUE_SIZE.to_string(),
            value: "lots".to_string(),
        }
    );

    std::env::set_var(ENV_QUEUE_SIZE, "-1");
    assert_eq!(PoolConfig::from_env(), Err(ConfigError::NegativeQueueSize));

    for key in [ENV_POOL_SIZE, ENV_POOL_CAPACITY, ENV_QUEUE_SIZE, ENV_STACK_SIZE] {
        std::env::remove_var(key);
    }
}
