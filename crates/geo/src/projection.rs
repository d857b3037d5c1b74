//! Local tangent-plane projection.
//!
//! Buffers and corridors are built in kilometres on a plane centred on the
//! geometry being buffered. The equirectangular projection is accurate to a
//! fraction of a percent over city-scale extents and degrades towards the poles.

use crate::{Location, EARTH_RADIUS_KM};

/// A point on the local plane, in kilometres east (`x`) and north (`y`)
/// of the projection origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    /// Kilometres east of the origin
    pub x: f64,
    /// Kilometres north of the origin
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Shortest distance from this point to the segment `a`-`b`.
    pub fn distance_to_segment(&self, a: &PlanarPoint, b: &PlanarPoint) -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return self.distance_to(a);
        }

        let t = (((self.x - a.x) * dx + (self.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
        self.distance_to(&PlanarPoint::new(a.x + t * dx, a.y + t * dy))
    }
}

/// Equirectangular projection around a fixed origin.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    origin: Location,
    cos_lat: f64,
}

impl LocalProjection {
    /// Creates a projection centred on `origin`.
    pub fn new(origin: Location) -> Self {
        // Keep the scale factor away from zero so the inverse stays finite at the poles.
        let cos_lat = origin.latitude.to_radians().cos().max(1e-6);
        Self { origin, cos_lat }
    }

    /// Creates a projection centred on the mean of `points`.
    ///
    /// Returns `None` for an empty slice.
    pub fn centred_on(points: &[Location]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let latitude = points.iter().map(|p| p.latitude).sum::<f64>() / n;
        // Average longitude offsets relative to the first point so the
        // antimeridian does not drag the centre to the far side of the globe.
        let base = points[0].longitude;
        let longitude = base + points.iter().map(|p| wrap_degrees(p.longitude - base)).sum::<f64>() / n;
        Some(Self::new(Location::new(latitude, wrap_degrees(longitude))))
    }

    pub fn origin(&self) -> Location {
        self.origin
    }

    /// Projects a location onto the plane.
    pub fn project(&self, location: &Location) -> PlanarPoint {
        let d_lon = wrap_degrees(location.longitude - self.origin.longitude).to_radians();
        let d_lat = (location.latitude - self.origin.latitude).to_radians();
        PlanarPoint::new(EARTH_RADIUS_KM * d_lon * self.cos_lat, EARTH_RADIUS_KM * d_lat)
    }

    /// Maps a planar point back to a location.
    pub fn unproject(&self, point: &PlanarPoint) -> Location {
        let latitude = self.origin.latitude + (point.y / EARTH_RADIUS_KM).to_degrees();
        let longitude =
            self.origin.longitude + (point.x / (EARTH_RADIUS_KM * self.cos_lat)).to_degrees();
        Location::new(latitude.clamp(-90.0, 90.0), wrap_degrees(longitude))
    }
}

/// Wraps an angle in degrees into `[-180, 180)`.
#[inline]
fn wrap_degrees(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
