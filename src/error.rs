/// Caller contract violations detected by the index.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("point has {found} coordinates, the index expects {expected}")]
    InvalidDimension { expected: usize, found: usize },

    #[error("bits per dimension must be in 1..=32, got {0}")]
    InvalidBitsPerDim(u32),

    #[error("{bits_per_dim} bits x {dimensions} dimensions does not fit in a 128-bit key")]
    KeyTooWide { bits_per_dim: u32, dimensions: usize },

    #[error("coordinate {value} of dimension {dimension} does not fit in {bits_per_dim} bits")]
    CoordinateOverflow {
        dimension: usize,
        value: u32,
        bits_per_dim: u32,
    },

    #[error("radius must be a non-negative number, got {0}")]
    InvalidRadius(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
