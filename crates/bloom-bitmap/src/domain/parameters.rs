//! Sizing helpers for Bloom filter parameters
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//!
//! `BloomFilter` never calls these; they are for callers picking `m`/`k`.

use std::f64::consts::LN_2;

/// Upper clamp for the derived hash count
pub const MAX_HASH_COUNT: usize = 32;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: u64,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Calculate optimal parameters for `num_elements` items at `target_fpr`
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomFilterParams {
    if num_elements == 0 {
        return BloomFilterParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let m = minimum_bits(num_elements, target_fpr).max(1);
    let k = optimal_k(m, num_elements as u64).clamp(1, MAX_HASH_COUNT);

    BloomFilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_elements as u64, k),
    }
}

/// FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: u64, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Optimal k for given m and n
pub fn optimal_k(m: u64, n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    ((m as f64 / n as f64) * LN_2).round() as usize
}

/// Minimum m for given n and target FPR
pub fn minimum_bits(n: usize, target_fpr: f64) -> u64 {
    let ln2_squared = LN_2 * LN_2;
    (-(n as f64) * target_fpr.ln() / ln2_squared).ceil() as u64
}
