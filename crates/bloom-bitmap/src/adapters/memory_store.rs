//! In-process bit-string store
//!
//! Emulates the subset of a Redis server that `RemoteBitmap` talks to:
//! `EXISTS`, `DEL` and `MULTI`/`EXEC` batches of `SETBIT`/`GETBIT`, with
//! the same lazy, byte-granular growth and MSB-first bit order. Clones
//! share one keyspace, so several bitmaps (or threads) can point at the
//! same key the way independent clients would.
//!
//! Stores built with [`InMemoryBitStore::with_command_log`] also record
//! every command in wire form for inspection in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use bitvec::prelude::*;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ports::{BitCommand, BitStore, BitStoreConnector, MAX_BIT_OFFSET};

#[derive(Default)]
struct Keyspace {
    keys: HashMap<String, BitVec<u8, Msb0>>,
    log: Vec<String>,
    recording: bool,
}

impl Keyspace {
    fn record(&mut self, command: impl FnOnce() -> String) {
        if self.recording {
            self.log.push(command());
        }
    }
}

#[derive(Default)]
struct Shared {
    /// One lock per transaction gives MULTI/EXEC isolation
    keyspace: Mutex<Keyspace>,
    unreachable: AtomicBool,
    opened: AtomicUsize,
    open: AtomicUsize,
}

/// Shared in-memory keyspace acting as a bit-string server
#[derive(Clone, Default)]
pub struct InMemoryBitStore {
    shared: Arc<Shared>,
}

impl InMemoryBitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that records every command it receives, see [`Self::command_log`]
    ///
    /// The log is unbounded; call [`Self::clear_command_log`] in long runs.
    pub fn with_command_log() -> Self {
        let store = Self::default();
        store.shared.keyspace.lock().recording = true;
        store
    }

    /// Simulate the server going down (or coming back)
    ///
    /// While unreachable, `connect` fails and every command on an open
    /// connection fails with a connection error.
    pub fn set_reachable(&self, reachable: bool) {
        self.shared.unreachable.store(!reachable, Ordering::SeqCst);
    }

    /// Total connections ever established
    pub fn connections_opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    /// Connections currently open
    pub fn open_connections(&self) -> usize {
        self.shared.open.load(Ordering::SeqCst)
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.shared.keyspace.lock().keys.contains_key(key)
    }

    /// Set one bit directly, bypassing connections and the command log
    pub fn setbit(&self, key: &str, offset: u64) -> Result<(), StoreError> {
        check_offset(offset)?;
        let mut keyspace = self.shared.keyspace.lock();
        let bits = keyspace.keys.entry(key.to_string()).or_default();
        setbit(bits, offset);
        Ok(())
    }

    /// Read one bit directly, bypassing connections and the command log
    pub fn getbit(&self, key: &str, offset: u64) -> bool {
        let keyspace = self.shared.keyspace.lock();
        keyspace
            .keys
            .get(key)
            .is_some_and(|bits| getbit(bits, offset) == 1)
    }

    /// Number of bits set under `key` (`BITCOUNT`)
    pub fn bit_count(&self, key: &str) -> usize {
        let keyspace = self.shared.keyspace.lock();
        keyspace.keys.get(key).map_or(0, |bits| bits.count_ones())
    }

    /// Commands received so far, e.g. `"SETBIT k 7 1"`
    ///
    /// Always empty unless the store was built with [`Self::with_command_log`].
    pub fn command_log(&self) -> Vec<String> {
        self.shared.keyspace.lock().log.clone()
    }

    pub fn clear_command_log(&self) {
        self.shared.keyspace.lock().log.clear();
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.shared.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

fn check_offset(offset: u64) -> Result<(), StoreError> {
    if offset > MAX_BIT_OFFSET {
        return Err(StoreError::Command(
            "bit offset is not an integer or out of range".to_string(),
        ));
    }
    Ok(())
}

fn setbit(bits: &mut BitVec<u8, Msb0>, offset: u64) -> u8 {
    let offset = offset as usize;
    if offset >= bits.len() {
        // Strings grow a whole byte at a time
        bits.resize((offset / 8 + 1) * 8, false);
    }
    let previous = bits[offset] as u8;
    bits.set(offset, true);
    previous
}

fn getbit(bits: &BitVec<u8, Msb0>, offset: u64) -> u8 {
    bits.get(offset as usize).map_or(0, |bit| *bit as u8)
}

impl BitStoreConnector for InMemoryBitStore {
    type Connection = InMemoryConnection;

    fn connect(&self, address: &str) -> Result<InMemoryConnection, StoreError> {
        if self.shared.unreachable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection(format!(
                "{}: connection refused",
                address
            )));
        }
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        self.shared.open.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryConnection {
            store: self.clone(),
            open: true,
        })
    }
}

/// Connection handle to an [`InMemoryBitStore`]
pub struct InMemoryConnection {
    store: InMemoryBitStore,
    open: bool,
}

impl InMemoryConnection {
    fn check(&self) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::Connection("connection closed".to_string()));
        }
        self.store.check_reachable()
    }
}

impl BitStore for InMemoryConnection {
    fn exists(&mut self, key: &str) -> Result<bool, StoreError> {
        self.check()?;
        let mut keyspace = self.store.shared.keyspace.lock();
        keyspace.record(|| format!("EXISTS {}", key));
        Ok(keyspace.keys.contains_key(key))
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut keyspace = self.store.shared.keyspace.lock();
        keyspace.record(|| format!("DEL {}", key));
        keyspace.keys.remove(key);
        Ok(())
    }

    fn exec_transaction(
        &mut self,
        key: &str,
        commands: &[BitCommand],
    ) -> Result<Vec<u8>, StoreError> {
        self.check()?;

        for command in commands {
            match *command {
                BitCommand::SetBit { offset } | BitCommand::GetBit { offset } => {
                    check_offset(offset)?
                }
            }
        }

        let mut keyspace = self.store.shared.keyspace.lock();

        keyspace.record(|| "MULTI".to_string());
        let mut replies = Vec::with_capacity(commands.len());
        for command in commands {
            match *command {
                BitCommand::SetBit { offset } => {
                    keyspace.record(|| format!("SETBIT {} {} 1", key, offset));
                    let bits = keyspace.keys.entry(key.to_string()).or_default();
                    replies.push(setbit(bits, offset));
                }
                BitCommand::GetBit { offset } => {
                    keyspace.record(|| format!("GETBIT {} {}", key, offset));
                    replies.push(keyspace.keys.get(key).map_or(0, |bits| getbit(bits, offset)));
                }
            }
        }
        keyspace.record(|| "EXEC".to_string());

        Ok(replies)
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.store.shared.open.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for InMemoryConnection {
    fn drop(&mut self) {
        self.close();
    }
}
