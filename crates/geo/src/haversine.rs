//! Great-circle distance, bearing and destination on a spherical Earth.

use crate::Location;

/// Mean Earth radius used by every spherical formula in this crate, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// [`EARTH_RADIUS_KM`] in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in kilometres.
///
/// Identical locations give exactly `0.0`, and antipodal pairs stay finite.
///
/// # Example
/// ```
/// use shopmap_geo::{haversine_distance, Location};
///
/// let kendari = Location::new(-3.9778, 122.5194);
/// let makassar = Location::new(-5.1477, 119.4327);
///
/// let km = haversine_distance(&kendari, &makassar);
/// assert!((km - 366.0).abs() < 1.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Location, to: &Location) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Great-circle distance in metres.
#[inline]
pub fn haversine_distance_meters(from: &Location, to: &Location) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Location, to: &Location, radius: f64) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just outside [0, 1] for antipodal points.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

/// Equirectangular distance in kilometres.
///
/// Cheaper than [`haversine_distance`] and within a fraction of a percent at
/// city scale; use it to pre-filter before measuring exactly.
#[inline]
pub fn approximate_distance(from: &Location, to: &Location) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;

    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}

/// Initial compass bearing from `from` to `to`, in degrees within `[0, 360)`.
///
/// Identical points yield `0.0`.
pub fn bearing(from: &Location, to: &Location) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Location reached by travelling `distance_km` along a great circle
/// starting at `origin` with initial bearing `bearing_deg`.
pub fn destination(origin: &Location, bearing_deg: f64, distance_km: f64) -> Location {
    let (lat1, lon1) = origin.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    // Normalise longitude back into [-180, 180]
    let lon2 = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    Location::new(lat2.to_degrees(), lon2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KENDARI: Location = Location { latitude: -3.9778, longitude: 122.5194 };
    const MAKASSAR: Location = Location { latitude: -5.1477, longitude: 119.4327 };
    const JAKARTA: Location = Location { latitude: -6.2088, longitude: 106.8456 };
    const JAYAPURA: Location = Location { latitude: -2.5337, longitude: 140.7181 };

    #[test]
    fn test_kendari_makassar() {
        let km = haversine_distance(&KENDARI, &MAKASSAR);
        assert!((km - 366.03).abs() < 0.05, "Kendari-Makassar: {}", km);
    }

    #[test]
    fn test_jakarta_jayapura() {
        let km = haversine_distance(&JAKARTA, &JAYAPURA);
        assert!((km - 3776.7).abs() < 0.5, "Jakarta-Jayapura: {}", km);
    }

    #[test]
    fn test_identical_points() {
        assert_eq!(haversine_distance(&KENDARI, &KENDARI), 0.0);
        assert_eq!(haversine_distance_meters(&JAKARTA, &JAKARTA), 0.0);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let a = Location::new(10.0, 20.0);
        let b = Location::new(-10.0, -160.0);
        let distance = haversine_distance(&a, &b);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!(distance.is_finite());
        assert!((distance - half).abs() < 1e-3, "antipodal: {}", distance);
    }

    #[test]
    fn test_near_identical_points() {
        let b = Location::new(-3.9778, 122.519_400_001);
        let distance = haversine_distance(&KENDARI, &b);
        assert!(distance > 0.0 && distance < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let there = haversine_distance(&MAKASSAR, &JAYAPURA);
        let back = haversine_distance(&JAYAPURA, &MAKASSAR);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_metres_match_kilometres() {
        let km = haversine_distance(&KENDARI, &MAKASSAR);
        let m = haversine_distance_meters(&KENDARI, &MAKASSAR);
        assert!((m - km * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_equirectangular_close_at_regional_scale() {
        let exact = haversine_distance(&KENDARI, &MAKASSAR);
        let quick = approximate_distance(&KENDARI, &MAKASSAR);
        assert!(((quick - exact) / exact).abs() < 1e-3);
    }

    #[test]
    fn test_cardinal_bearings() {
        let origin = Location::new(0.0, 0.0);
        assert!((bearing(&origin, &Location::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((bearing(&origin, &Location::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(&origin, &Location::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((bearing(&origin, &Location::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_same_point() {
        assert_eq!(bearing(&KENDARI, &KENDARI), 0.0);
    }

    #[test]
    fn test_bearing_makassar_to_kendari() {
        // Kendari lies east-north-east of Makassar
        let b = bearing(&MAKASSAR, &KENDARI);
        assert!((b - 69.31).abs() < 0.01, "bearing: {}", b);
    }

    #[test]
    fn test_destination_round_trip() {
        let target = destination(&KENDARI, 120.0, 25.0);
        assert!((haversine_distance(&KENDARI, &target) - 25.0).abs() < 1e-6);
        assert!((bearing(&KENDARI, &target) - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let origin = Location::new(0.0, 179.9);
        let target = destination(&origin, 90.0, 50.0);
        assert!(target.is_valid());
        assert!(target.longitude < -179.0);
    }
}
