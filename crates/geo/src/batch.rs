//! Batch distance calculations with optional parallelism.
//!
//! Used for one-to-many lookups against a shop list: nearest-k, radius
//! filtering and picking the first stop of a tour.

use crate::{haversine_distance, Location};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distance from a query origin to one location of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Position of the location in the input slice
    pub index: usize,
    /// Great-circle distance in kilometers
    pub distance: f64,
}

/// Calculate distances from `origin` to every location, in input order.
///
/// # Example
/// ```
/// use shopmap_geo::{distances_from, Location};
///
/// let shops = [Location::new(-3.9778, 122.5194), Location::new(-3.9800, 122.5200)];
/// let distances = distances_from(&Location::new(-3.9785, 122.5190), &shops);
/// assert_eq!(distances.len(), 2);
/// assert!(distances.iter().all(|d| *d < 1.0));
/// ```
pub fn distances_from(origin: &Location, locations: &[Location]) -> Vec<f64> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        locations
            .par_iter()
            .map(|location| haversine_distance(origin, location))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        locations
            .iter()
            .map(|location| haversine_distance(origin, location))
            .collect()
    }
}

/// Calculate distances and return them sorted closest first.
///
/// Equal distances keep input order, so results are deterministic.
///
/// # Arguments
/// * `origin` - Query location
/// * `locations` - Locations to measure
/// * `max_results` - Maximum number of results to return (None for all)
pub fn distances_sorted(
    origin: &Location,
    locations: &[Location],
    max_results: Option<usize>,
) -> Vec<DistanceResult> {
    let mut results = indexed(distances_from(origin, locations));
    sort_by_distance(&mut results);

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Calculate distances for locations within `radius_km`, sorted closest first.
pub fn distances_within_radius(
    origin: &Location,
    locations: &[Location],
    radius_km: f64,
) -> Vec<DistanceResult> {
    let mut results = indexed(distances_from(origin, locations));
    results.retain(|r| r.distance <= radius_km);
    sort_by_distance(&mut results);
    results
}

fn indexed(distances: Vec<f64>) -> Vec<DistanceResult> {
    distances
        .into_iter()
        .enumerate()
        .map(|(index, distance)| DistanceResult { index, distance })
        .collect()
}

fn sort_by_distance(results: &mut [DistanceResult]) {
    results.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
        Ordering::Equal => a.index.cmp(&b.index),
        other => other,
    });
}
