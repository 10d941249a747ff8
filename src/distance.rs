use crate::error::{Error, Result};

/// Squared Euclidean distance, exact in `i128` for any `u32` coordinates.
#[must_use]
pub fn distance_squared<const D: usize>(a: &[u32; D], b: &[u32; D]) -> i128 {
    let mut sum = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = i128::from(*x) - i128::from(*y);
        sum += diff * diff;
    }
    sum
}

// The radius is squared in floating point and truncated toward zero, so a
// radius of 2.9 admits squared distances up to 8. Squares beyond `i128`
// (an infinite radius) saturate and admit every point.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn radius_squared(radius: f64) -> Result<i128> {
    if radius.is_nan() || radius < 0.0 {
        return Err(Error::InvalidRadius(radius));
    }
    Ok((radius * radius) as i128)
}
