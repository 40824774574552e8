//! Ports Layer
//!
//! Defines the driven interfaces the filter engine depends on.

pub mod outbound;

pub use outbound::{BitCommand, BitStore, BitStoreConnector, Bitmap, MAX_BIT_OFFSET};
