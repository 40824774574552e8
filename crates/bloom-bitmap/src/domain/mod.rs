//! Domain Layer - Pure logic, no I/O
//!
//! - Hash-to-index derivation
//! - Bloom filter engine (generic over the `Bitmap` port)
//! - Sizing helpers
//! - Remote backend configuration

pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use config::{RemoteBitmapConfig, RemoteBitmapConfigBuilder, DEFAULT_STORE_ADDRESS};
pub use hash_functions::{locations, murmur_hash128, HashLocations};
pub use parameters::{
    calculate_fpr, calculate_optimal_parameters, minimum_bits, optimal_k, BloomFilterParams,
};
