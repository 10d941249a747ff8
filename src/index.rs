use crate::error::Result;

/// A fixed-dimension point with unsigned integer coordinates.
pub type Point<const D: usize> = [u32; D];

/// Operations shared by the Morton index and the exact linear baseline.
pub trait SpatialIndex<const D: usize> {
    /// Store `point`. Inserting an equal point again stores another copy.
    ///
    /// # Errors
    ///
    /// Implementation specific contract violations.
    fn insert(&mut self, point: Point<D>) -> Result<()>;

    /// Collect the stored points found within `radius` of `center`.
    ///
    /// # Errors
    ///
    /// `InvalidRadius` for a negative or NaN radius.
    fn within_radius(&self, center: &Point<D>, radius: f64) -> Result<Vec<Point<D>>>;

    /// Number of stored points, counting duplicates.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
