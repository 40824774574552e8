//! Metrics hooks for Bloom filter operations
//!
//! ## Usage
//!
//! ```ignore
//! use bloom_bitmap::{BloomFilter, LocalBitmap, Metrics};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = BloomFilter::with_metrics(1000, 4, LocalBitmap::new(), metrics.clone())?;
//! filter.add_str("abc")?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for Bloom filter operations
///
/// Thread-safe counters; one collector may be shared by many filters.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Sum of `m` over all created filters
    pub bits_allocated: AtomicU64,
    /// Largest `k` of any created filter
    pub max_hash_count: AtomicU64,
    /// Total successful adds
    pub elements_added: AtomicU64,
    /// Total successful lookups
    pub lookups_performed: AtomicU64,
    /// Lookups that answered "possibly present"
    pub lookups_positive: AtomicU64,
    /// Failed init/set/test calls on the bitmap backend
    pub backend_errors: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_created(&self, size_bits: u64, hash_count: u32) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bits_allocated.fetch_add(size_bits, Ordering::Relaxed);
        self.max_hash_count
            .fetch_max(u64::from(hash_count), Ordering::Relaxed);
    }

    pub fn record_add(&self, duration: Duration) {
        self.elements_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// `found` is the filter's answer, false positives included
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            bits_allocated: self.bits_allocated.load(Ordering::Relaxed),
            max_hash_count: self.max_hash_count.load(Ordering::Relaxed),
            elements_added: self.elements_added.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            backend_errors: self.backend_errors.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_add_ns: self.avg_add_time_ns(),
        }
    }

    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    pub fn avg_add_time_ns(&self) -> u64 {
        let total = self.add_time_ns.load(Ordering::Relaxed);
        let count = self.elements_added.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Share of lookups answered "possibly present"
    ///
    /// Includes true positives, so it only bounds the false positive rate
    /// from above when the probed items were never added.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.bits_allocated.store(0, Ordering::Relaxed);
        self.max_hash_count.store(0, Ordering::Relaxed);
        self.elements_added.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.backend_errors.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.add_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub bits_allocated: u64,
    pub max_hash_count: u64,
    pub elements_added: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub backend_errors: u64,
    pub avg_lookup_ns: u64,
    pub avg_add_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward filter activity to Prometheus, StatsD, etc.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, size_bits: u64, hash_count: u32);

    fn record_add(&self, duration: Duration);

    fn record_lookup(&self, duration: Duration, found: bool);

    fn record_backend_error(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: u64, _: u32) {}
    fn record_add(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_backend_error(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bits: u64, hash_count: u32) {
        Metrics::record_filter_created(self, size_bits, hash_count);
    }

    fn record_add(&self, duration: Duration) {
        Metrics::record_add(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_backend_error(&self) {
        Metrics::record_backend_error(self);
    }
}
