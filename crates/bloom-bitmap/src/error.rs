//! Error types for the Bloom filter and its bitmap backends

use thiserror::Error;

/// Errors raised by a bit-string store connection (driven port)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

/// Errors raised by a [`Bitmap`](crate::ports::Bitmap) backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// Invalid backend configuration, e.g. an empty key name
    #[error("Invalid bitmap configuration: {0}")]
    Configuration(String),

    /// The backing store could not be reached
    #[error("Failed to connect to bit store: {0}")]
    Connection(#[source] StoreError),

    /// The key already holds data and the delete policy is disabled
    #[error("Bitmap key already exists: {key}")]
    KeyConflict { key: String },

    /// A set/test transaction (or the init-time key check) failed
    #[error("Bit store transaction failed: {0}")]
    Transport(#[source] StoreError),

    #[error("Bitmap used before init")]
    NotInitialized,

    #[error("Bitmap already initialized")]
    AlreadyInitialized,

    /// `m` exceeds what the backend can address
    #[error("Bitmap size {m} exceeds backend capacity")]
    CapacityOverflow { m: u64 },
}

/// Errors surfaced by [`BloomFilter`](crate::BloomFilter) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),
}
