//! Remote bitmap configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use bloom_bitmap::RemoteBitmapConfigBuilder;
//!
//! let config = RemoteBitmapConfigBuilder::new()
//!     .address("127.0.0.1:6379")
//!     .bitmap_key("seen_urls")
//!     .remove_key_if_exists(true)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BitmapError;

pub const DEFAULT_STORE_ADDRESS: &str = "127.0.0.1:6379";

/// Configuration of a shared bit-string backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteBitmapConfig {
    /// Network address of the store, `host:port` or a `redis://` URL
    pub address: String,
    /// Key holding the shared bit-string (required, non-empty)
    pub bitmap_key: String,
    /// Delete a pre-existing key at init instead of failing with a conflict
    pub remove_key_if_exists: bool,
}

impl Default for RemoteBitmapConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_STORE_ADDRESS.to_string(),
            bitmap_key: String::new(),
            remove_key_if_exists: false,
        }
    }
}

impl RemoteBitmapConfig {
    pub fn new(address: impl Into<String>, bitmap_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            bitmap_key: bitmap_key.into(),
            remove_key_if_exists: false,
        }
    }

    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.bitmap_key.is_empty() {
            return Err(BitmapError::Configuration(
                "bitmap key is not specified".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set the delete-on-conflict policy
    pub fn with_remove_key_if_exists(mut self, remove: bool) -> Self {
        self.remove_key_if_exists = remove;
        self
    }
}

/// Builder for RemoteBitmapConfig with validation
#[derive(Default)]
pub struct RemoteBitmapConfigBuilder {
    address: Option<String>,
    bitmap_key: Option<String>,
    remove_key_if_exists: Option<bool>,
}

impl RemoteBitmapConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn bitmap_key(mut self, key: impl Into<String>) -> Self {
        self.bitmap_key = Some(key.into());
        self
    }

    pub fn remove_key_if_exists(mut self, remove: bool) -> Self {
        self.remove_key_if_exists = Some(remove);
        self
    }

    /// Build the config, rejecting an empty key
    pub fn build(self) -> Result<RemoteBitmapConfig, BitmapError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation; `RemoteBitmap::init` still validates
    pub fn build_unchecked(self) -> RemoteBitmapConfig {
        let defaults = RemoteBitmapConfig::default();

        RemoteBitmapConfig {
            address: self.address.unwrap_or(defaults.address),
            bitmap_key: self.bitmap_key.unwrap_or(defaults.bitmap_key),
            remove_key_if_exists: self
                .remove_key_if_exists
                .unwrap_or(defaults.remove_key_if_exists),
        }
    }
}
