//! # Bloom Bitmap Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs     # Backend-agnostic membership scenarios
//!     ├── local_flows.rs   # Scenarios over LocalBitmap
//!     ├── shared_key.rs    # RemoteBitmap over the in-memory store
//!     └── redis_flows.rs   # RemoteBitmap over a live Redis (ignored by default)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bloom-tests
//!
//! # Needs a Redis server on 127.0.0.1:6379
//! cargo test -p bloom-tests -- --ignored
//!
//! cargo bench -p bloom-tests
//! ```


use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`, e.g. `RUST_LOG=bloom_bitmap=debug`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
