//! # Bloom Bitmap
//!
//! Bloom filter whose bit storage is a pluggable backend: a local bit
//! vector, or a bit-string shared through a Redis-compatible store.
//!
//! ## Architecture
//!
//! Hexagonal (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): pure logic, no I/O
//!   - `BloomFilter`: engine combining hash derivation with a `Bitmap`
//!   - `HashLocations` / `locations`: deterministic bit-index derivation
//!   - `RemoteBitmapConfig`: shared-backend configuration
//!   - sizing helpers (`calculate_optimal_parameters`, ...)
//!
//! - **Ports Layer** (`ports/`): trait definitions
//!   - `Bitmap`: storage capability (`init` / `set` / `test` / `close`)
//!   - `BitStoreConnector` / `BitStore`: connection to a bit-string store
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `LocalBitmap`, `RemoteBitmap`
//!   - `InMemoryBitStore`, `RedisConnector`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: same `(data, m, k)` → same ordered bit positions
//! - **INVARIANT-2**: no false negatives - bits are only ever set, never cleared
//! - **INVARIANT-3**: a remote `set` / `test` is one `MULTI ... EXEC` transaction
//!
//! ## Usage Example
//!
//! ```ignore
//! use bloom_bitmap::{BloomFilter, LocalBitmap, RemoteBitmap, RemoteBitmapConfigBuilder};
//!
//! let mut filter = BloomFilter::new(1000, 4, LocalBitmap::new())?;
//! filter.add_str("abc")?;
//! assert!(filter.test_str("abc")?);
//!
//! let config = RemoteBitmapConfigBuilder::new()
//!     .address("127.0.0.1:6379")
//!     .bitmap_key("bitmap_key")
//!     .remove_key_if_exists(true)
//!     .build()?;
//! let mut shared = BloomFilter::new(1 << 32, 7, RemoteBitmap::redis(config))?;
//! shared.add_str("abc")?;
//! shared.close();
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use adapters::{InMemoryBitStore, LocalBitmap, RemoteBitmap};
#[cfg(feature = "redis")]
pub use adapters::{RedisBitStore, RedisConnector};
pub use domain::{
    calculate_optimal_parameters, locations, BloomFilter, BloomFilterParams, HashLocations,
    RemoteBitmapConfig, RemoteBitmapConfigBuilder,
};
pub use error::{BitmapError, FilterError, StoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{BitCommand, BitStore, BitStoreConnector, Bitmap, MAX_BIT_OFFSET};
