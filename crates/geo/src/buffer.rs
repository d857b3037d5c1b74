//! Polyline buffering and circle polygons.
//!
//! Buffers are built on a [`LocalProjection`] centred on the input, so widths
//! are honoured to within the projection's error: a fraction of a percent at
//! city scale, worse near the poles.

use crate::projection::{LocalProjection, PlanarPoint};
use crate::{destination, Location, Polygon};
use std::f64::consts::{FRAC_PI_2, PI};

/// Arc vertices per quarter turn used by [`buffer_polygon`].
const DEFAULT_ARC_SEGMENTS: usize = 8;

/// Buffers `line` by `distance_km` on each side and returns the outline.
///
/// Ends are round-capped and outer corners round-joined. An empty line or a
/// non-positive width yields an empty polygon; a single point yields a circle.
pub fn buffer_polygon(line: &[Location], distance_km: f64) -> Polygon {
    Corridor::new(line, distance_km, DEFAULT_ARC_SEGMENTS).outline().clone()
}

/// Approximates a circle of `radius_km` around `center` with `segments` vertices.
///
/// Vertices are placed with the forward geodesic, so every vertex sits exactly
/// `radius_km` from the centre. A non-positive radius yields an empty polygon.
pub fn circle_polygon(center: &Location, radius_km: f64, segments: usize) -> Polygon {
    if radius_km <= 0.0 || !radius_km.is_finite() {
        return Polygon::empty();
    }
    let segments = segments.max(3);
    let step = 360.0 / segments as f64;
    Polygon::new(
        (0..segments)
            .map(|i| destination(center, i as f64 * step, radius_km))
            .collect(),
    )
}

/// The region within a fixed distance of a polyline.
///
/// Membership is decided by distance to the nearest segment on the local
/// plane, which is exact for the buffered region; the outline is the
/// polygonal approximation of the same region for display.
#[derive(Debug, Clone)]
pub struct Corridor {
    projection: Option<LocalProjection>,
    points: Vec<PlanarPoint>,
    width_km: f64,
    outline: Polygon,
}

impl Corridor {
    /// Buffers `line` by `width_km`, using `arc_segments` vertices per quarter
    /// turn on caps and joins.
    pub fn new(line: &[Location], width_km: f64, arc_segments: usize) -> Self {
        let projection = match LocalProjection::centred_on(line) {
            Some(p) if width_km > 0.0 && width_km.is_finite() => p,
            _ => return Self::empty(width_km),
        };

        let mut points: Vec<PlanarPoint> = Vec::with_capacity(line.len());
        for location in line {
            let p = projection.project(location);
            if points.last().map_or(true, |last| last.distance_to(&p) > 1e-12) {
                points.push(p);
            }
        }

        let arc_segments = arc_segments.max(1);
        let planar_outline = if points.len() == 1 {
            arc(&points[0], 0.0, 2.0 * PI, width_km, arc_segments, false)
        } else {
            let mut ring = offset_side(&points, width_km, arc_segments);
            let reversed: Vec<PlanarPoint> = points.iter().rev().copied().collect();
            ring.extend(offset_side(&reversed, width_km, arc_segments));
            ring
        };

        let outline = Polygon::new(
            planar_outline
                .iter()
                .map(|p| projection.unproject(p))
                .collect(),
        );

        Self {
            projection: Some(projection),
            points,
            width_km,
            outline,
        }
    }

    fn empty(width_km: f64) -> Self {
        Self {
            projection: None,
            points: Vec::new(),
            width_km,
            outline: Polygon::empty(),
        }
    }

    pub fn width_km(&self) -> f64 {
        self.width_km
    }

    pub fn outline(&self) -> &Polygon {
        &self.outline
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if `location` lies within the corridor.
    pub fn contains(&self, location: &Location) -> bool {
        let Some(projection) = &self.projection else {
            return false;
        };
        let p = projection.project(location);

        match self.points.as_slice() {
            [] => false,
            [only] => p.distance_to(only) <= self.width_km,
            points => points
                .windows(2)
                .any(|w| p.distance_to_segment(&w[0], &w[1]) <= self.width_km),
        }
    }
}

/// Left-hand offset of `points` followed by the round cap at the far end.
///
/// The cap stops short of its final vertex, which is the first vertex of the
/// opposite side, so two calls chain into a closed ring without duplicates.
fn offset_side(points: &[PlanarPoint], width: f64, arc_segments: usize) -> Vec<PlanarPoint> {
    let mut out = Vec::new();
    let mut prev_normal: Option<(f64, f64)> = None;

    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let normal = left_normal(a, b);

        match prev_normal {
            None => out.push(offset(a, normal, width)),
            Some(prev) => {
                let turn = prev.0 * normal.1 - prev.1 * normal.0;
                let sweep = turn.atan2(prev.0 * normal.0 + prev.1 * normal.1);
                if sweep < 0.0 {
                    // Right turn: this side is on the outside of the corner.
                    out.extend(arc(a, angle(prev), sweep, width, arc_segments, true));
                } else {
                    out.push(offset(a, prev, width));
                    out.push(offset(a, normal, width));
                }
            }
        }
        prev_normal = Some(normal);
    }

    if let (Some(normal), Some(end)) = (prev_normal, points.last()) {
        out.push(offset(end, normal, width));
        let mut cap = arc(end, angle(normal), -PI, width, arc_segments, true);
        cap.remove(0);
        cap.pop();
        out.extend(cap);
    }

    out
}

fn left_normal(a: &PlanarPoint, b: &PlanarPoint) -> (f64, f64) {
    let len = a.distance_to(b);
    (-(b.y - a.y) / len, (b.x - a.x) / len)
}

fn angle(v: (f64, f64)) -> f64 {
    v.1.atan2(v.0)
}

fn offset(p: &PlanarPoint, normal: (f64, f64), width: f64) -> PlanarPoint {
    PlanarPoint::new(p.x + normal.0 * width, p.y + normal.1 * width)
}

/// Points on a circular arc of radius `width` around `center`.
///
/// With `closed_end` the end angle is included; a full circle leaves it out
/// since it coincides with the start.
fn arc(
    center: &PlanarPoint,
    start: f64,
    sweep: f64,
    width: f64,
    per_quarter: usize,
    closed_end: bool,
) -> Vec<PlanarPoint> {
    let steps = ((sweep.abs() / FRAC_PI_2) * per_quarter as f64).ceil().max(1.0) as usize;
    let last = if closed_end { steps } else { steps - 1 };
    (0..=last)
        .map(|i| {
            let theta = start + sweep * i as f64 / steps as f64;
            PlanarPoint::new(center.x + width * theta.cos(), center.y + width * theta.sin())
        })
        .collect()
}
