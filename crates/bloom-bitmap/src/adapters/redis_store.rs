//! Redis adapter for the bit-string store port
//!
//! Transactions are sent as one atomic pipeline, which the client
//! serializes as `MULTI`, the queued commands and `EXEC` in a single
//! write, then reads the `EXEC` reply array.

use redis::{Client, Connection, Pipeline, RedisError};
use tracing::debug;

use crate::adapters::remote::RemoteBitmap;
use crate::domain::RemoteBitmapConfig;
use crate::error::StoreError;
use crate::ports::{BitCommand, BitStore, BitStoreConnector};

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

/// Accepts either `host:port` or a full `redis://` / `rediss://` URL
pub fn connection_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}/", address)
    }
}

/// Build the `MULTI; ...; EXEC` pipeline for one bit transaction
pub fn transaction_pipeline(key: &str, commands: &[BitCommand]) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for command in commands {
        match *command {
            BitCommand::SetBit { offset } => {
                pipe.cmd("SETBIT").arg(key).arg(offset).arg(1);
            }
            BitCommand::GetBit { offset } => {
                pipe.cmd("GETBIT").arg(key).arg(offset);
            }
        }
    }
    pipe
}

/// Opens one blocking Redis connection per `connect`
///
/// Timeouts and TLS follow whatever the URL configures.
#[derive(Clone, Debug, Default)]
pub struct RedisConnector;

impl BitStoreConnector for RedisConnector {
    type Connection = RedisBitStore;

    fn connect(&self, address: &str) -> Result<RedisBitStore, StoreError> {
        let url = connection_url(address);
        let client =
            Client::open(url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;
        let conn = client
            .get_connection()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        debug!(url = %url, "Redis connection established");
        Ok(RedisBitStore { conn: Some(conn) })
    }
}

/// Open Redis connection
pub struct RedisBitStore {
    conn: Option<Connection>,
}

impl RedisBitStore {
    fn conn(&mut self) -> Result<&mut Connection, StoreError> {
        self.conn
            .as_mut()
            .ok_or_else(|| StoreError::Connection("connection closed".to_string()))
    }
}

impl BitStore for RedisBitStore {
    fn exists(&mut self, key: &str) -> Result<bool, StoreError> {
        let exists: bool = redis::cmd("EXISTS").arg(key).query(self.conn()?)?;
        Ok(exists)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let _removed: i64 = redis::cmd("DEL").arg(key).query(self.conn()?)?;
        Ok(())
    }

    fn exec_transaction(
        &mut self,
        key: &str,
        commands: &[BitCommand],
    ) -> Result<Vec<u8>, StoreError> {
        let replies: Vec<i64> = transaction_pipeline(key, commands).query(self.conn()?)?;
        replies
            .into_iter()
            .map(|reply| match reply {
                0 => Ok(0),
                1 => Ok(1),
                other => Err(StoreError::UnexpectedReply(format!(
                    "bit reply out of range: {}",
                    other
                ))),
            })
            .collect()
    }

    fn close(&mut self) {
        // Dropping the connection closes the socket
        self.conn = None;
    }
}

impl RemoteBitmap<RedisConnector> {
    /// Bitmap stored under `config.bitmap_key` on a Redis server
    pub fn redis(config: RemoteBitmapConfig) -> Self {
        RemoteBitmap::new(config, RedisConnector)
    }
}
