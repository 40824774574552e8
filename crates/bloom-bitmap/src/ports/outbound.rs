//! Outbound Ports (Driven Ports)
//!
//! - `Bitmap`: the bit-storage capability a `BloomFilter` is built on
//! - `BitStoreConnector` / `BitStore`: connection to an external
//!   key-value bit-string store, consumed by `RemoteBitmap`

use crate::error::{BitmapError, StoreError};

/// Largest bit offset a bit-string store addresses (`SETBIT` / `GETBIT`
/// on a 512 MB string), so a remote bitmap holds at most `2^32` bits
pub const MAX_BIT_OFFSET: u64 = (1 << 32) - 1;

/// Bit-storage capability (Driven Port)
///
/// Production: `LocalBitmap` (process memory), `RemoteBitmap` (shared store)
///
/// Contract:
/// - `init` is called exactly once before any `set` / `test`
/// - a bit set to 1 is never cleared by any operation
/// - `set` applies the whole batch as one logical operation
/// - `close` is idempotent
pub trait Bitmap: Send {
    /// Prepare storage for exactly `m` addressable bits
    fn init(&mut self, m: u64) -> Result<(), BitmapError>;

    /// Set every listed bit to 1
    fn set(&mut self, indices: &[u64]) -> Result<(), BitmapError>;

    /// Returns true iff every listed bit reads as 1
    fn test(&mut self, indices: &[u64]) -> Result<bool, BitmapError>;

    /// Release backend resources
    fn close(&mut self);
}

impl<B: Bitmap + ?Sized> Bitmap for Box<B> {
    fn init(&mut self, m: u64) -> Result<(), BitmapError> {
        (**self).init(m)
    }

    fn set(&mut self, indices: &[u64]) -> Result<(), BitmapError> {
        (**self).set(indices)
    }

    fn test(&mut self, indices: &[u64]) -> Result<bool, BitmapError> {
        (**self).test(indices)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// A single bit command queued inside a store transaction
///
/// Wire form for key `K`: `SETBIT K offset 1` / `GETBIT K offset`.
/// Both reply with one integer, 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitCommand {
    SetBit { offset: u64 },
    GetBit { offset: u64 },
}

/// Open connection to a bit-string store
///
/// Production: `RedisBitStore`
/// Testing: `InMemoryConnection`
pub trait BitStore: Send {
    /// `EXISTS key`
    fn exists(&mut self, key: &str) -> Result<bool, StoreError>;

    /// `DEL key`
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Execute `MULTI; <commands...>; EXEC` as one atomic unit
    ///
    /// Returns one reply per command, in command order.
    fn exec_transaction(&mut self, key: &str, commands: &[BitCommand])
        -> Result<Vec<u8>, StoreError>;

    /// Close the connection. Must tolerate repeated calls.
    fn close(&mut self);
}

/// Establishes connections to a bit-string store
///
/// Retry, pooling and timeouts are the connector's concern.
pub trait BitStoreConnector: Send {
    type Connection: BitStore;

    fn connect(&self, address: &str) -> Result<Self::Connection, StoreError>;
}
