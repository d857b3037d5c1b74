//! Ad hoc spatial lookups against the loaded shop list.

use crate::error::{Result, RouteError};
use crate::matrix::DistanceMatrices;
use crate::shop::Shop;
use serde::Serialize;
use shopmap_geo::batch::{distances_sorted, distances_within_radius};
use shopmap_geo::{circle_polygon, Corridor, Location, Polygon};

/// A shop matched by a query, with its position in the shop list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexedShop<'a> {
    pub index: usize,
    pub shop: &'a Shop,
}

/// A shop matched by a distance query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearbyShop<'a> {
    pub index: usize,
    pub shop: &'a Shop,
    pub distance_km: f64,
}

/// Result of a fixed-radius query, with a circle outline for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusQuery<'a> {
    pub center: Location,
    pub radius_km: f64,
    pub outline: Polygon,
    /// Matches sorted closest first
    pub shops: Vec<NearbyShop<'a>>,
}

/// Result of a route-corridor query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorQuery<'a> {
    pub buffer_km: f64,
    pub outline: Polygon,
    /// Matches in shop-list order
    pub shops: Vec<IndexedShop<'a>>,
}

/// Summary of the shop network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkStats {
    pub count: usize,
    /// Mean of the non-zero direct distances
    pub average_direct_km: f64,
    pub min_direct_km: f64,
    pub max_direct_km: f64,
    /// Share of ordered shop pairs joined by a direct edge
    pub density: f64,
}

/// Query engine borrowing the shop list and its matrices.
#[derive(Debug, Clone, Copy)]
pub struct SpatialQueryEngine<'a> {
    shops: &'a [Shop],
    matrices: &'a DistanceMatrices,
    circle_segments: usize,
    buffer_segments: usize,
}

impl<'a> SpatialQueryEngine<'a> {
    pub fn new(shops: &'a [Shop], matrices: &'a DistanceMatrices) -> Self {
        Self {
            shops,
            matrices,
            circle_segments: 64,
            buffer_segments: 8,
        }
    }

    /// Sets the vertex counts used for radius circles and corridor arcs.
    pub fn with_resolution(mut self, circle_segments: usize, buffer_segments: usize) -> Self {
        self.circle_segments = circle_segments;
        self.buffer_segments = buffer_segments;
        self
    }

    /// Up to `limit` shops within `max_distance_km` of `origin`, closest first.
    ///
    /// Equal distances are ordered by shop index.
    pub fn find_nearest(
        &self,
        origin: &Location,
        limit: usize,
        max_distance_km: f64,
    ) -> Result<Vec<NearbyShop<'a>>> {
        origin.validate()?;
        check_distance("max_distance_km", max_distance_km)?;

        let shops = self.shops;
        let locations = self.locations();
        Ok(distances_sorted(origin, &locations, None)
            .into_iter()
            .take_while(|r| r.distance <= max_distance_km)
            .take(limit)
            .map(|r| NearbyShop {
                index: r.index,
                shop: &shops[r.index],
                distance_km: r.distance,
            })
            .collect())
    }

    /// Shops whose location lies inside `polygon`, in shop-list order.
    pub fn find_within_polygon(&self, polygon: &Polygon) -> Vec<IndexedShop<'a>> {
        let shops = self.shops;
        shops
            .iter()
            .enumerate()
            .filter(|(_, shop)| polygon.contains(&shop.location))
            .map(|(index, shop)| IndexedShop { index, shop })
            .collect()
    }

    /// Shops within `buffer_km` of a route polyline.
    ///
    /// An empty route matches nothing.
    pub fn find_along_route(&self, route: &[Location], buffer_km: f64) -> Result<CorridorQuery<'a>> {
        for location in route {
            location.validate()?;
        }
        check_distance("buffer_km", buffer_km)?;

        let corridor = Corridor::new(route, buffer_km, self.buffer_segments);
        let shops = self.shops;
        let matches = shops
            .iter()
            .enumerate()
            .filter(|(_, shop)| corridor.contains(&shop.location))
            .map(|(index, shop)| IndexedShop { index, shop })
            .collect();

        Ok(CorridorQuery {
            buffer_km,
            outline: corridor.outline().clone(),
            shops: matches,
        })
    }

    /// Shops within `radius_km` of `center`, plus the circle for display.
    pub fn find_within_radius(&self, center: &Location, radius_km: f64) -> Result<RadiusQuery<'a>> {
        center.validate()?;
        check_distance("radius_km", radius_km)?;

        let shops = self.shops;
        let locations = self.locations();
        let matches = distances_within_radius(center, &locations, radius_km)
            .into_iter()
            .map(|r| NearbyShop {
                index: r.index,
                shop: &shops[r.index],
                distance_km: r.distance,
            })
            .collect();

        Ok(RadiusQuery {
            center: *center,
            radius_km,
            outline: circle_polygon(center, radius_km, self.circle_segments),
            shops: matches,
        })
    }

    /// Distance statistics over the direct matrix and edge density of the
    /// adjacency graph.
    ///
    /// Zero-length pairs (co-located shops) are left out of the distance
    /// figures. With fewer than two shops every figure is zero.
    pub fn network_stats(&self) -> NetworkStats {
        let direct = &self.matrices.direct;
        let n = direct.size();

        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = 0.0f64;
        for i in 0..n {
            for &d in direct.row(i) {
                if d > 0.0 && d.is_finite() {
                    count += 1;
                    sum += d;
                    min = min.min(d);
                    max = max.max(d);
                }
            }
        }

        let pairs = n * n.saturating_sub(1);
        NetworkStats {
            count: n,
            average_direct_km: if count > 0 { sum / count as f64 } else { 0.0 },
            min_direct_km: if count > 0 { min } else { 0.0 },
            max_direct_km: max,
            density: if pairs > 0 {
                self.matrices.adjacency.finite_off_diagonal() as f64 / pairs as f64
            } else {
                0.0
            },
        }
    }

    fn locations(&self) -> Vec<Location> {
        self.shops.iter().map(|shop| shop.location).collect()
    }
}

fn check_distance(name: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(RouteError::InvalidInput(format!(
            "{} must be a non-negative distance, got {}",
            name, value
        )));
    }
    Ok(())
}
