use crate::{
    distance::{distance_squared, radius_squared},
    error::Result,
    index::{Point, SpatialIndex},
};

/// Brute-force index that checks every stored point. Its radius queries are
/// exact, which makes it the reference for measuring what the key window of a
/// [`ZIndex`](crate::ZIndex) misses.
#[derive(Default)]
pub struct LinearIndex<const D: usize> {
    points: Vec<Point<D>>,
}

impl<const D: usize> LinearIndex<D> {
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn insert(&mut self, point: Point<D>) {
        self.points.push(point);
    }

    /// Call `visitor` with every stored point within `radius` of `center`, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// `InvalidRadius` for a negative or NaN radius.
    pub fn query_radius<F>(&self, center: &Point<D>, radius: f64, mut visitor: F) -> Result<()>
    where
        F: FnMut(&Point<D>),
    {
        let radius_squared = radius_squared(radius)?;
        for point in &self.points {
            if distance_squared(center, point) <= radius_squared {
                visitor(point);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<const D: usize> SpatialIndex<D> for LinearIndex<D> {
    fn insert(&mut self, point: Point<D>) -> Result<()> {
        self.points.push(point);
        Ok(())
    }

    fn within_radius(&self, center: &Point<D>, radius: f64) -> Result<Vec<Point<D>>> {
        let mut result = Vec::new();
        self.query_radius(center, radius, |point| result.push(*point))?;
        Ok(result)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
