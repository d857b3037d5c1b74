//! Spherical geometry primitives for the shop map.
//!
//! This crate provides:
//! - Haversine distance and initial bearing
//! - Polygon membership (ray casting)
//! - Polyline buffering into corridors
//! - Circle polygons for radius queries
//! - Batch distance calculations with optional parallelism
//!
//! # Example
//!
//! ```
//! use shopmap_geo::{haversine_distance, Location};
//!
//! let shop = Location::new(-3.9778, 122.5194);
//! let customer = Location::new(-3.9785, 122.5190);
//!
//! let distance_km = haversine_distance(&shop, &customer);
//! assert!(distance_km < 0.1); // ~90 m
//! ```

mod haversine;
mod projection;
mod polygon;
mod buffer;
pub mod batch;
mod error;

pub use haversine::{
    approximate_distance, bearing, destination, haversine_distance, haversine_distance_meters,
    EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use projection::{LocalProjection, PlanarPoint};
pub use polygon::{point_in_polygon, Polygon};
pub use buffer::{buffer_polygon, circle_polygon, Corridor};
pub use batch::distances_from;
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Location {
    /// Creates a new location without range checks.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a location, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let location = Self::new(latitude, longitude);
        location.validate()?;
        Ok(location)
    }

    /// Returns true if the location has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns an error if the location is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
