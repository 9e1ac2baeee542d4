//! Tests for builder modules

use prometheus_elastic_pool::{ConfigError, PoolBuilder, PoolConfig, PoolError};

#[test]
fn test_pool_builder_collects_settings() {
    let builder = PoolBuilder::new()
        .pool_size(2)
        .pool_capacity(5)
        .queue_size(10)
        .thread_stack_size(512 * 1024);

    let config = builder.config();
    assert_eq!(config.pool_size, 2);
    assert_eq!(config.pool_capacity, 5);
    assert_eq!(config.queue_size, 10);
    assert_eq!(config.thread_stack_size, Some(512 * 1024));
}

#[test]
fn test_pool_builder_defaults() {
    let builder = PoolBuilder::new();
    assert_eq!(builder.config(), &PoolConfig::default());
}

#[test]
fn test_pool_builder_builds_pool() {
    let pool = PoolBuilder::from_config(PoolConfig::new(3))
        .pool_capacity(3)
        .build()
        .expect("build pool");
    assert_eq!(pool.worker_count(), 3);
    pool.close_and_join();
}

#[test]
fn test_pool_builder_validates() {
    let err = PoolBuilder::new().pool_size(4).pool_capacity(2).build().unwrap_err();
    assert!(matches!(err, PoolError::Config(ConfigError::IllegalPoolCapacity)));
}
