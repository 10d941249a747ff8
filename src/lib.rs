mod config;
mod distance;
mod error;
mod index;
mod linear;
pub mod morton;
#[allow(clippy::module_name_repetitions)]
mod zindex;

pub use config::IndexConfig;
pub use distance::distance_squared;
pub use error::{Error, Result};
pub use index::{Point, SpatialIndex};
pub use linear::LinearIndex;
pub use zindex::{RadiusQuery, ZIndex};
