//! Process-local bitmap backend

use bitvec::prelude::*;

use crate::error::BitmapError;
use crate::ports::Bitmap;

/// Dense in-memory bit vector
///
/// Owned exclusively by the filter it is injected into. Cross-thread use
/// of one instance needs external serialization.
#[derive(Clone, Debug, Default)]
pub struct LocalBitmap {
    bits: Option<BitVec<u64, Lsb0>>,
}

impl LocalBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of addressable bits, `None` before `init`
    pub fn size_bits(&self) -> Option<usize> {
        self.bits.as_ref().map(|bits| bits.len())
    }

    /// Number of bits currently set to 1
    pub fn bits_set(&self) -> usize {
        self.bits.as_ref().map_or(0, |bits| bits.count_ones())
    }

    fn bits_mut(&mut self) -> Result<&mut BitVec<u64, Lsb0>, BitmapError> {
        self.bits.as_mut().ok_or(BitmapError::NotInitialized)
    }
}

impl Bitmap for LocalBitmap {
    fn init(&mut self, m: u64) -> Result<(), BitmapError> {
        if self.bits.is_some() {
            return Err(BitmapError::AlreadyInitialized);
        }
        let len = usize::try_from(m)
            .ok()
            .filter(|&len| len <= BitSlice::<u64, Lsb0>::MAX_BITS)
            .ok_or(BitmapError::CapacityOverflow { m })?;
        self.bits = Some(bitvec![u64, Lsb0; 0; len]);
        Ok(())
    }

    /// # Panics
    /// Panics if an index is `>= m`.
    fn set(&mut self, indices: &[u64]) -> Result<(), BitmapError> {
        let bits = self.bits_mut()?;
        for &i in indices {
            bits.set(i as usize, true);
        }
        Ok(())
    }

    /// # Panics
    /// Panics if an index is `>= m`.
    fn test(&mut self, indices: &[u64]) -> Result<bool, BitmapError> {
        let bits = self.bits_mut()?;
        Ok(indices.iter().all(|&i| bits[i as usize]))
    }

    fn close(&mut self) {
        // nothing to release
    }
}
