use std::{
    collections::{btree_map, BTreeMap},
    ops::{RangeBounds, RangeInclusive},
    slice,
};

use tracing::{debug, trace};

use crate::{
    config::IndexConfig,
    distance::{distance_squared, radius_squared},
    error::{Error, Result},
    index::{Point, SpatialIndex},
    morton::{coordinate_mask, encode, max_key},
};

/// Spatial index over `D`-dimensional integer points ordered by Morton key.
///
/// Points are kept in a `BTreeMap` from key to every point with that key, so
/// points whose low bits coincide share a bucket. Radius queries scan a fixed
/// window of keys around the center and filter the candidates by exact
/// distance: every reported point is within the radius, but points outside
/// the key window are never seen, even when they are close in space.
pub struct ZIndex<const D: usize> {
    config: IndexConfig,
    max_key: u128,
    len: usize,
    tree: BTreeMap<u128, Vec<Point<D>>>,
}

impl<const D: usize> ZIndex<D> {
    /// Create an empty index.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not describe keys that fit in 128 bits for `D`.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate::<D>()?;
        debug!(
            dimensions = D,
            bits_per_dim = config.bits_per_dim,
            delta = config.delta,
            strict = config.strict,
            "created z-order index"
        );
        Ok(ZIndex {
            config,
            max_key: max_key::<D>(config.bits_per_dim),
            len: 0,
            tree: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Morton key of `point` under this index's bit width.
    #[must_use]
    pub fn encode(&self, point: &Point<D>) -> u128 {
        encode(point, self.config.bits_per_dim)
    }

    /// Store `point` under its Morton key.
    ///
    /// Coordinates wider than `bits_per_dim` are truncated by the encoder, so
    /// distinct points can share a key. Both are kept.
    ///
    /// # Errors
    ///
    /// `CoordinateOverflow` in strict mode only.
    pub fn insert(&mut self, point: Point<D>) -> Result<()> {
        self.check_coordinates(&point)?;
        let key = self.encode(&point);
        self.tree.entry(key).or_default().push(point);
        self.len += 1;
        Ok(())
    }

    /// Insert a point given as a slice of coordinates.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if the slice length is not `D`, otherwise as [`ZIndex::insert`].
    pub fn insert_slice(&mut self, coordinates: &[u32]) -> Result<()> {
        let point = <Point<D>>::try_from(coordinates).map_err(|_| Error::InvalidDimension {
            expected: D,
            found: coordinates.len(),
        })?;
        self.insert(point)
    }

    /// Call `visitor` with every point of the key window around `center` that
    /// lies within `radius`, in ascending key order.
    ///
    /// # Errors
    ///
    /// `InvalidRadius` for a negative or NaN radius, and `CoordinateOverflow`
    /// for the center in strict mode. The visitor is not called on error.
    pub fn query_radius<F>(&self, center: &Point<D>, radius: f64, mut visitor: F) -> Result<()>
    where
        F: FnMut(&Point<D>),
    {
        let mut query = self.query_radius_iter(center, radius)?;
        let mut matches = 0;
        for point in query.by_ref() {
            visitor(point);
            matches += 1;
        }
        trace!(candidates = query.candidates(), matches, "radius query done");
        Ok(())
    }

    /// Lazy form of [`ZIndex::query_radius`] yielding the same points in the same order.
    ///
    /// # Errors
    ///
    /// Same as [`ZIndex::query_radius`].
    pub fn query_radius_iter(&self, center: &Point<D>, radius: f64) -> Result<RadiusQuery<'_, D>> {
        self.check_coordinates(center)?;
        let radius_squared = radius_squared(radius)?;
        let window = self.key_window(center);
        trace!(
            start = %window.start(),
            end = %window.end(),
            radius_squared = %radius_squared,
            "radius query"
        );
        Ok(RadiusQuery {
            center: *center,
            radius_squared,
            buckets: self.tree.range(window),
            bucket: <&[Point<D>]>::default().iter(),
            candidates: 0,
        })
    }

    /// Keys scanned by a radius query around `center`: `delta` on either side
    /// of the center's key, clipped to the key space.
    #[must_use]
    pub fn key_window(&self, center: &Point<D>) -> RangeInclusive<u128> {
        let center_key = self.encode(center);
        let delta = u128::from(self.config.delta);
        let start = center_key.saturating_sub(delta);
        let end = center_key.saturating_add(delta).min(self.max_key);
        start..=end
    }

    /// Stored points with their keys, in ascending key order, restricted to `keys`.
    ///
    /// # Panics
    ///
    /// Panics on a range `BTreeMap::range` rejects (start after end, or equal
    /// excluded bounds).
    pub fn range<R>(&self, keys: R) -> impl Iterator<Item = (u128, &Point<D>)> + '_
    where
        R: RangeBounds<u128>,
    {
        self.tree
            .range(keys)
            .flat_map(|(key, bucket)| bucket.iter().map(move |point| (*key, point)))
    }

    /// All stored points with their keys, in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u128, &Point<D>)> + '_ {
        self.range(..)
    }

    fn check_coordinates(&self, point: &Point<D>) -> Result<()> {
        if !self.config.strict {
            return Ok(());
        }
        let mask = coordinate_mask(self.config.bits_per_dim);
        match point.iter().position(|coordinate| coordinate & !mask != 0) {
            Some(dimension) => Err(Error::CoordinateOverflow {
                dimension,
                value: point[dimension],
                bits_per_dim: self.config.bits_per_dim,
            }),
            None => Ok(()),
        }
    }
}

impl<const D: usize> Default for ZIndex<D> {
    /// # Panics
    ///
    /// Panics if the default 16 bits per dimension do not fit `D` (`D` of 0 or above 8).
    fn default() -> Self {
        ZIndex::new(IndexConfig::default()).expect("Invalid dimension for default config")
    }
}

impl<const D: usize> SpatialIndex<D> for ZIndex<D> {
    fn insert(&mut self, point: Point<D>) -> Result<()> {
        ZIndex::insert(self, point)
    }

    fn within_radius(&self, center: &Point<D>, radius: f64) -> Result<Vec<Point<D>>> {
        Ok(self.query_radius_iter(center, radius)?.copied().collect())
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Points of a key window within a radius of a center, in ascending key order.
pub struct RadiusQuery<'a, const D: usize> {
    center: Point<D>,
    radius_squared: i128,
    buckets: btree_map::Range<'a, u128, Vec<Point<D>>>,
    bucket: slice::Iter<'a, Point<D>>,
    candidates: usize,
}

impl<'a, const D: usize> RadiusQuery<'a, D> {
    /// Number of points in the key window examined so far.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.candidates
    }
}

impl<'a, const D: usize> Iterator for RadiusQuery<'a, D> {
    type Item = &'a Point<D>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for point in self.bucket.by_ref() {
                self.candidates += 1;
                if distance_squared(&self.center, point) <= self.radius_squared {
                    return Some(point);
                }
            }
            let (_, bucket) = self.buckets.next()?;
            self.bucket = bucket.iter();
        }
    }
}
