//! Bloom filter engine
//!
//! INVARIANTS:
//! - INVARIANT-1: Determinism - identical (data, m, k) always address the
//!   identical, identically ordered bit positions
//! - INVARIANT-2: No false negatives - after a successful `add(x)`,
//!   `test(x)` on the same storage returns true
//!
//! The engine never computes or enforces the false-positive rate
//! `(1 - e^(-kn/m))^k`; callers pick `m` and `k` for their target.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::hash_functions::locations;
use super::parameters::BloomFilterParams;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::Bitmap;

/// Bloom filter over an injected bitmap backend
///
/// `test` returning `false` proves absence; `true` may be a false positive.
pub struct BloomFilter<B: Bitmap> {
    /// Size in bits (m)
    m: u64,
    /// Number of hash functions (k)
    k: u32,
    bitmap: B,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<B: Bitmap> BloomFilter<B> {
    /// Create a filter with `m` bits and `k` hash functions
    ///
    /// Calls `bitmap.init(m)` and fails if that fails.
    pub fn new(m: u64, k: u32, bitmap: B) -> Result<Self, FilterError> {
        Self::with_metrics(m, k, bitmap, Arc::new(NoOpMetrics))
    }

    /// Create a filter from precomputed sizing parameters
    pub fn from_params(params: &BloomFilterParams, bitmap: B) -> Result<Self, FilterError> {
        let k = u32::try_from(params.hash_count).map_err(|_| {
            FilterError::InvalidParameters(format!("k={} is too large", params.hash_count))
        })?;
        Self::new(params.size_bits, k, bitmap)
    }

    /// Create a filter that reports to the given metrics recorder
    pub fn with_metrics(
        m: u64,
        k: u32,
        mut bitmap: B,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, FilterError> {
        if m == 0 {
            return Err(FilterError::InvalidParameters(
                "m (bit count) must be > 0".to_string(),
            ));
        }
        if k == 0 {
            return Err(FilterError::InvalidParameters(
                "k (hash count) must be > 0".to_string(),
            ));
        }

        if let Err(e) = bitmap.init(m) {
            metrics.record_backend_error();
            return Err(e.into());
        }

        info!(m = m, k = k, "Bloom filter initialized");
        metrics.record_filter_created(m, k);

        Ok(Self {
            m,
            k,
            bitmap,
            metrics,
        })
    }

    /// Add an element to the filter
    ///
    /// On error the addressed bits are indeterminate; the whole add may
    /// be retried.
    pub fn add(&mut self, data: &[u8]) -> Result<(), FilterError> {
        let start = Instant::now();
        let positions = locations(data, self.k, self.m);

        if let Err(e) = self.bitmap.set(&positions) {
            self.metrics.record_backend_error();
            return Err(e.into());
        }

        self.metrics.record_add(start.elapsed());
        Ok(())
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    pub fn test(&mut self, data: &[u8]) -> Result<bool, FilterError> {
        let start = Instant::now();
        let positions = locations(data, self.k, self.m);

        let found = match self.bitmap.test(&positions) {
            Ok(found) => found,
            Err(e) => {
                self.metrics.record_backend_error();
                return Err(e.into());
            }
        };

        self.metrics.record_lookup(start.elapsed(), found);
        Ok(found)
    }

    /// Add the UTF-8 bytes of `data`
    pub fn add_str(&mut self, data: &str) -> Result<(), FilterError> {
        self.add(data.as_bytes())
    }

    /// Test the UTF-8 bytes of `data`
    pub fn test_str(&mut self, data: &str) -> Result<bool, FilterError> {
        self.test(data.as_bytes())
    }

    /// Bit positions this filter addresses for `data`
    pub fn positions(&self, data: &[u8]) -> Vec<u64> {
        locations(data, self.k, self.m)
    }

    pub fn size_bits(&self) -> u64 {
        self.m
    }

    pub fn hash_count(&self) -> u32 {
        self.k
    }

    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut B {
        &mut self.bitmap
    }

    pub fn into_bitmap(self) -> B {
        self.bitmap
    }

    /// Release the underlying bitmap's resources
    pub fn close(&mut self) {
        self.bitmap.close();
    }
}
