//! Command implementations

pub mod corridor;
pub mod nearest;
pub mod path;
pub mod radius;
pub mod stats;
pub mod tour;

use anyhow::{bail, Context, Result};
use shopmap_geo::Location;

/// Parse a `"lat,lng"` pair into a validated location.
pub fn parse_point(value: &str) -> Result<Location> {
    let Some((lat, lng)) = value.split_once(',') else {
        bail!("Expected \"lat,lng\", got {:?}", value);
    };
    let latitude: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude in {:?}", value))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude in {:?}", value))?;
    Ok(Location::try_new(latitude, longitude)?)
}
