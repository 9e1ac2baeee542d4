//! Tests for delayed-task spawners

use prometheus_elastic_pool::runtime::{Spawn, ThreadSpawner, TokioSpawner};
use prometheus_elastic_pool::{Pool, PoolConfig};
use std::time::{Duration, Instant};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn_after() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    let start = Instant::now();
    spawner
        .spawn_after(Duration::from_millis(50), move || {
            tx.send(123).unwrap();
        })
        .unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), rx)
        .await
        .expect("timer fired")
        .expect("oneshot result");
    assert_eq!(result, 123);
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pool_schedule_with_delay_on_tokio() {
    let pool = Pool::new(&PoolConfig::new(1).with_queue_size(1)).unwrap();
    let spawner = TokioSpawner::current().expect("inside runtime");

    let (tx, rx) = tokio::sync::oneshot::channel();
    let start = Instant::now();
    pool.schedule_with_delay_on(&spawner, move || tx.send(()).unwrap(), Duration::from_millis(100))
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), rx)
        .await
        .expect("delayed job ran")
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(100));
    pool.close();
}

#[test]
fn test_tokio_spawner_outside_runtime() {
    assert!(TokioSpawner::current().is_err());
}

#[test]
fn test_thread_spawner_returns_immediately() {
    let (tx, rx) = std::sync::mpsc::channel();
    let start = Instant::now();
    ThreadSpawner
        .spawn_after(Duration::from_millis(100), move || tx.send(()).unwrap())
        .unwrap();
    assert!(start.elapsed() < Duration::from_millis(100));
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
}
