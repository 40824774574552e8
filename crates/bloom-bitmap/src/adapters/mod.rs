//! Adapters Layer
//!
//! - `LocalBitmap` - bits in process memory
//! - `RemoteBitmap` - bits in a shared key-value bit-string store
//! - `InMemoryBitStore` - in-process stand-in for that store
//! - `RedisConnector` - Redis implementation of the store port (`redis` feature)

pub mod local;
pub mod memory_store;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod remote;

pub use local::LocalBitmap;
pub use memory_store::{InMemoryBitStore, InMemoryConnection};
#[cfg(feature = "redis")]
pub use redis_store::{RedisBitStore, RedisConnector};
pub use remote::RemoteBitmap;
