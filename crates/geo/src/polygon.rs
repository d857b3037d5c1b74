//! Polygon rings and point membership.

use crate::Location;
use serde::{Deserialize, Serialize};

/// A closed ring of locations.
///
/// The first and last vertices are implicitly connected; a ring that already
/// repeats its first vertex at the end is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Location>,
}

impl Polygon {
    pub fn new(mut vertices: Vec<Location>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    /// A polygon with no vertices. Contains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Location] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if `location` lies inside the ring.
    pub fn contains(&self, location: &Location) -> bool {
        point_in_polygon(location, &self.vertices)
    }
}

impl From<Vec<Location>> for Polygon {
    fn from(vertices: Vec<Location>) -> Self {
        Self::new(vertices)
    }
}

/// Even-odd ray casting test for `point` against a closed ring.
///
/// The ring's longitudes are unwrapped once from its first vertex, taking
/// each edge the shorter way around, so rings that straddle the antimeridian
/// behave. The query longitude is then tried at its 360° aliases against that
/// fixed ring. Rings with fewer than three vertices contain nothing.
///
/// # Example
/// ```
/// use shopmap_geo::{point_in_polygon, Location};
///
/// let square = [
///     Location::new(0.0, 0.0),
///     Location::new(0.0, 1.0),
///     Location::new(1.0, 1.0),
///     Location::new(1.0, 0.0),
/// ];
/// assert!(point_in_polygon(&Location::new(0.5, 0.5), &square));
/// assert!(!point_in_polygon(&Location::new(1.5, 0.5), &square));
/// ```
pub fn point_in_polygon(point: &Location, ring: &[Location]) -> bool {
    let mut ring = ring;
    if ring.len() > 1 && ring.first() == ring.last() {
        ring = &ring[..ring.len() - 1];
    }
    if ring.len() < 3 {
        return false;
    }

    let xs = unwrapped_longitudes(ring);
    [0.0, -360.0, 360.0]
        .iter()
        .any(|shift| crosses_odd(point.longitude + shift, point.latitude, ring, &xs))
}

/// Vertex longitudes made continuous from vertex 0; no edge jumps more than 180°.
fn unwrapped_longitudes(ring: &[Location]) -> Vec<f64> {
    let mut xs = Vec::with_capacity(ring.len());
    let mut prev = ring[0].longitude;
    xs.push(prev);
    for vertex in &ring[1..] {
        prev += (vertex.longitude - prev + 180.0).rem_euclid(360.0) - 180.0;
        xs.push(prev);
    }
    xs
}

fn crosses_odd(px: f64, py: f64, ring: &[Location], xs: &[f64]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (xs[i], ring[i].latitude);
        let (xj, yj) = (xs[j], ring[j].latitude);

        if (yi > py) != (yj > py) {
            let x_cross = xi + (py - yi) * (xj - xi) / (yj - yi);
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
