//! Shared bit-string bitmap backend
//!
//! Bits live under one key of an external key-value store. Every `set`
//! and `test` is a single `MULTI ... EXEC` transaction: one round trip for
//! all `k` bit commands, applied atomically relative to any other
//! transaction on the same key.
//!
//! Atomicity holds within one call only. Two filters sharing a key are not
//! serialized against each other, so a `test` racing another instance's
//! `add` of the same item can observe it half-added until that batch commits.

use tracing::{debug, warn};

use crate::domain::RemoteBitmapConfig;
use crate::error::{BitmapError, StoreError};
use crate::ports::{BitCommand, BitStore, BitStoreConnector, Bitmap, MAX_BIT_OFFSET};

/// Bitmap backed by a key in a shared bit-string store
///
/// Holds at most one connection: acquired by `init`, released by `close`
/// or on drop. The store grows the bit-string lazily, so `init` allocates
/// nothing server-side.
pub struct RemoteBitmap<C: BitStoreConnector> {
    config: RemoteBitmapConfig,
    connector: C,
    conn: Option<C::Connection>,
}

impl<C: BitStoreConnector> RemoteBitmap<C> {
    pub fn new(config: RemoteBitmapConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            conn: None,
        }
    }

    pub fn config(&self) -> &RemoteBitmapConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Resolve a pre-existing key according to the delete policy
    fn prepare_key(conn: &mut C::Connection, config: &RemoteBitmapConfig) -> Result<(), BitmapError> {
        let key = config.bitmap_key.as_str();
        let exists = conn.exists(key).map_err(BitmapError::Transport)?;
        if !exists {
            return Ok(());
        }

        if !config.remove_key_if_exists {
            warn!(key = key, "Bitmap key already exists, refusing to reuse it");
            return Err(BitmapError::KeyConflict {
                key: key.to_string(),
            });
        }

        warn!(key = key, "Deleting pre-existing bitmap key");
        conn.delete(key).map_err(BitmapError::Transport)
    }

    fn transaction(&mut self, commands: &[BitCommand]) -> Result<Vec<u8>, BitmapError> {
        let conn = self.conn.as_mut().ok_or(BitmapError::NotInitialized)?;
        let replies = conn
            .exec_transaction(&self.config.bitmap_key, commands)
            .map_err(BitmapError::Transport)?;

        if replies.len() != commands.len() {
            return Err(BitmapError::Transport(StoreError::UnexpectedReply(format!(
                "expected {} replies, got {}",
                commands.len(),
                replies.len()
            ))));
        }
        Ok(replies)
    }
}

impl<C: BitStoreConnector> Bitmap for RemoteBitmap<C> {
    fn init(&mut self, m: u64) -> Result<(), BitmapError> {
        if self.conn.is_some() {
            return Err(BitmapError::AlreadyInitialized);
        }
        self.config.validate()?;
        if m > MAX_BIT_OFFSET + 1 {
            return Err(BitmapError::CapacityOverflow { m });
        }

        let mut conn = self
            .connector
            .connect(&self.config.address)
            .map_err(BitmapError::Connection)?;
        debug!(
            address = %self.config.address,
            key = %self.config.bitmap_key,
            m = m,
            "Connected to bit store"
        );

        if let Err(e) = Self::prepare_key(&mut conn, &self.config) {
            conn.close();
            return Err(e);
        }

        self.conn = Some(conn);
        Ok(())
    }

    fn set(&mut self, indices: &[u64]) -> Result<(), BitmapError> {
        if self.conn.is_none() {
            return Err(BitmapError::NotInitialized);
        }
        if indices.is_empty() {
            return Ok(());
        }

        let commands: Vec<BitCommand> = indices
            .iter()
            .map(|&offset| BitCommand::SetBit { offset })
            .collect();
        let previous = self.transaction(&commands)?;

        debug!(
            key = %self.config.bitmap_key,
            bits = commands.len(),
            newly_set = previous.iter().filter(|&&bit| bit == 0).count(),
            "SETBIT transaction committed"
        );
        Ok(())
    }

    fn test(&mut self, indices: &[u64]) -> Result<bool, BitmapError> {
        if self.conn.is_none() {
            return Err(BitmapError::NotInitialized);
        }
        if indices.is_empty() {
            return Ok(true);
        }

        let commands: Vec<BitCommand> = indices
            .iter()
            .map(|&offset| BitCommand::GetBit { offset })
            .collect();
        let bits = self.transaction(&commands)?;

        Ok(bits.iter().all(|&bit| bit != 0))
    }

    fn close(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.close();
            debug!(key = %self.config.bitmap_key, "Bit store connection closed");
        }
    }
}

impl<C: BitStoreConnector> Drop for RemoteBitmap<C> {
    fn drop(&mut self) {
        self.close();
    }
}
