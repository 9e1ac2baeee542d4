//! Builders to construct pools fluently.

pub mod pool_builder;

pub use pool_builder::PoolBuilder;
