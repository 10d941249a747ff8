use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    morton::{COORDINATE_BITS, KEY_BITS},
};

/// Runtime parameters of a [`ZIndex`](crate::ZIndex). The dimension is the
/// const generic of the index itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Low bits of every coordinate that go into the key.
    pub bits_per_dim: u32,
    /// Half-width of the key window scanned by a radius query.
    ///
    /// The window is fixed and does not grow with the radius. Points that are
    /// close in space but sit across a Z-order cell boundary can be further
    /// apart than this in key space and are then missed.
    pub delta: u64,
    /// Reject coordinates with bits above `bits_per_dim` instead of dropping them.
    pub strict: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            bits_per_dim: 16,
            delta: 500_000,
            strict: false,
        }
    }
}

impl IndexConfig {
    #[must_use]
    pub fn new(bits_per_dim: u32, delta: u64) -> Self {
        IndexConfig {
            bits_per_dim,
            delta,
            strict: false,
        }
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check that `D`-dimensional keys fit in 128 bits.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for `D == 0`, `InvalidBitsPerDim` outside `1..=32`
    /// and `KeyTooWide` when `bits_per_dim * D > 128`.
    pub fn validate<const D: usize>(&self) -> Result<()> {
        if D == 0 {
            return Err(Error::InvalidDimension {
                expected: 1,
                found: 0,
            });
        }
        if self.bits_per_dim == 0 || self.bits_per_dim > COORDINATE_BITS {
            return Err(Error::InvalidBitsPerDim(self.bits_per_dim));
        }
        if self.bits_per_dim as usize * D > KEY_BITS as usize {
            return Err(Error::KeyTooWide {
                bits_per_dim: self.bits_per_dim,
                dimensions: D,
            });
        }
        Ok(())
    }
}
