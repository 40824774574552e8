//! Hash-to-index derivation
//!
//! Uses MurmurHash3 (x64, 128-bit) with incrementing seeds. Every seed
//! yields two candidate indices, the low 64-bit half first and then the
//! high half, each reduced modulo `m`. Harvesting stops as soon as `k`
//! indices have been produced, possibly mid-pair.

use std::io::Cursor;
use std::iter::FusedIterator;

/// Hash an element with MurmurHash3 x64/128 using the given seed
pub fn murmur_hash128(element: &[u8], seed: u32) -> u128 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory cursor cannot fail
    murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0)
}

/// Lazy, finite sequence of the `k` bit indices derived for one element
///
/// The sequence is fully determined by `(data, k, m)`; its order is also
/// the order in which a transactional backend queues its bit commands.
#[derive(Clone, Debug)]
pub struct HashLocations<'a> {
    data: &'a [u8],
    m: u64,
    remaining: usize,
    seed: u32,
    /// High half of the last hash, not yet emitted
    pending: Option<u64>,
}

impl<'a> HashLocations<'a> {
    pub fn new(data: &'a [u8], k: u32, m: u64) -> Self {
        Self {
            data,
            m,
            remaining: if m == 0 { 0 } else { k as usize },
            seed: 0,
            pending: None,
        }
    }
}

impl Iterator for HashLocations<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }

        let value = match self.pending.take() {
            Some(high) => high,
            None => {
                let hash = murmur_hash128(self.data, self.seed);
                self.seed = self.seed.wrapping_add(1);
                self.pending = Some((hash >> 64) as u64);
                hash as u64
            }
        };

        self.remaining -= 1;
        Some(value % self.m)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for HashLocations<'_> {}

impl FusedIterator for HashLocations<'_> {}

/// Compute the `k` bit positions of `element` in a bitmap of `m` bits
///
/// Identical inputs always produce the identical, identically ordered
/// sequence. Duplicate positions are possible and harmless.
pub fn locations(element: &[u8], k: u32, m: u64) -> Vec<u64> {
    HashLocations::new(element, k, m).collect()
}
