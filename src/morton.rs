//! Bit interleaving of fixed-dimension points into a single sortable key.
//!
//! Bit `i` of coordinate `j` lands on key bit `i * D + j`, so the key orders
//! points along a Z-order curve. Only the low `bits_per_dim` bits of every
//! coordinate are read; anything above is silently dropped.

/// Number of bits in a coordinate.
pub const COORDINATE_BITS: u32 = u32::BITS;

/// Number of bits in a key.
pub const KEY_BITS: u32 = u128::BITS;

/// Interleave the low `bits_per_dim` bits of every coordinate of `point`.
///
/// `bits_per_dim * D` must not exceed [`KEY_BITS`]; [`IndexConfig::validate`]
/// checks this for an index.
///
/// [`IndexConfig::validate`]: crate::IndexConfig::validate
#[must_use]
pub fn encode<const D: usize>(point: &[u32; D], bits_per_dim: u32) -> u128 {
    debug_assert!(bits_per_dim as usize * D <= KEY_BITS as usize);
    let mut key = 0;
    for i in 0..bits_per_dim.min(COORDINATE_BITS) {
        for (j, coordinate) in point.iter().enumerate() {
            let bit = u128::from((coordinate >> i) & 1);
            key |= bit << (i as usize * D + j);
        }
    }
    key
}

/// Inverse of [`encode`]: recover the low `bits_per_dim` bits of each coordinate.
#[must_use]
pub fn decode<const D: usize>(key: u128, bits_per_dim: u32) -> [u32; D] {
    debug_assert!(bits_per_dim as usize * D <= KEY_BITS as usize);
    let mut point = [0; D];
    for i in 0..bits_per_dim.min(COORDINATE_BITS) {
        for (j, coordinate) in point.iter_mut().enumerate() {
            let bit = (key >> (i as usize * D + j)) & 1;
            *coordinate |= (bit as u32) << i;
        }
    }
    point
}

/// Largest key a `D`-dimensional point can encode to.
#[must_use]
pub fn max_key<const D: usize>(bits_per_dim: u32) -> u128 {
    let bits = bits_per_dim as usize * D;
    if bits >= KEY_BITS as usize {
        u128::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Mask of the coordinate bits the encoder reads.
#[must_use]
pub fn coordinate_mask(bits_per_dim: u32) -> u32 {
    if bits_per_dim >= COORDINATE_BITS {
        u32::MAX
    } else {
        (1 << bits_per_dim) - 1
    }
}
