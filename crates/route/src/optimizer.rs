//! The caller-owned route optimizer handle.
//!
//! Loading a shop list builds every matrix eagerly; all queries afterwards
//! are read-only, so a shared `&RouteOptimizer` can serve queries from any
//! number of threads. Changing the shop list means calling
//! [`RouteOptimizer::initialize`] again, which replaces the cache wholesale.

use crate::config::OptimizerConfig;
use crate::error::{Result, RouteError};
use crate::matrix::{DistanceMatrices, DistanceMatrixBuilder, SquareMatrix};
use crate::shop::Shop;
use crate::shortest_path::ShortestPaths;
use crate::spatial::{CorridorQuery, IndexedShop, NearbyShop, NetworkStats, RadiusQuery, SpatialQueryEngine};
use crate::tour::{Tour, TourPlanner};
use serde::Serialize;
use shopmap_geo::{Location, Polygon};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Shortest path between two shops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopPath {
    pub from: usize,
    pub to: usize,
    /// Infinite when the shops are not connected
    pub distance_km: f64,
    /// Shop indices from `from` to `to` inclusive; empty when unreachable
    pub path: Vec<usize>,
}

#[derive(Debug, Clone)]
struct Network {
    shops: Vec<Shop>,
    matrices: DistanceMatrices,
    paths: ShortestPaths,
    by_id: HashMap<i64, usize>,
}

/// Distance matrices, shortest paths and queries for one shop list.
///
/// # Example
///
/// ```
/// use shopmap_geo::Location;
/// use shopmap_route::{OptimizerConfig, RouteOptimizer, Shop};
///
/// let shops = vec![
///     Shop::new(1, Location::new(-3.9778, 122.5194)),
///     Shop::new(2, Location::new(-3.9800, 122.5200)),
///     Shop::new(3, Location::new(-3.9750, 122.5180)),
/// ];
/// let optimizer = RouteOptimizer::with_shops(shops, OptimizerConfig::default()).unwrap();
///
/// let start = Location::new(-3.9785, 122.5190);
/// let tour = optimizer.plan_tour(&start, &[0, 1, 2]).unwrap();
/// assert_eq!(tour.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
    network: Option<Network>,
}

impl RouteOptimizer {
    /// Creates an optimizer with no shops loaded.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, network: None })
    }

    /// Creates an optimizer and loads `shops`.
    pub fn with_shops(shops: Vec<Shop>, config: OptimizerConfig) -> Result<Self> {
        let mut optimizer = Self::new(config)?;
        optimizer.initialize(shops)?;
        Ok(optimizer)
    }

    /// Loads a shop list, building the distance, adjacency and shortest-path
    /// matrices.
    ///
    /// Any previously loaded network is dropped first, so a failed load
    /// leaves the optimizer uninitialized rather than serving stale results.
    /// Shop ids must be unique.
    pub fn initialize(&mut self, shops: Vec<Shop>) -> Result<()> {
        self.network = None;
        let started = Instant::now();

        let mut by_id = HashMap::with_capacity(shops.len());
        for (index, shop) in shops.iter().enumerate() {
            if by_id.insert(shop.id, index).is_some() {
                return Err(RouteError::InvalidInput(format!("duplicate shop id {}", shop.id)));
            }
        }

        let matrices = DistanceMatrixBuilder::new(self.config.max_connection_km).build(&shops)?;
        let paths = ShortestPaths::solve(&matrices.adjacency);

        info!(
            shops = shops.len(),
            edges = matrices.edge_count(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Route network initialized"
        );

        self.network = Some(Network {
            shops,
            matrices,
            paths,
            by_id,
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.network.is_some()
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn network(&self) -> Result<&Network> {
        self.network.as_ref().ok_or(RouteError::NotInitialized)
    }

    pub fn shops(&self) -> Result<&[Shop]> {
        Ok(&self.network()?.shops)
    }

    pub fn distance_matrix(&self) -> Result<&SquareMatrix> {
        Ok(&self.network()?.matrices.direct)
    }

    pub fn adjacency_matrix(&self) -> Result<&SquareMatrix> {
        Ok(&self.network()?.matrices.adjacency)
    }

    pub fn shortest_paths(&self) -> Result<&ShortestPaths> {
        Ok(&self.network()?.paths)
    }

    /// Index of the shop with the given id.
    pub fn index_of(&self, id: i64) -> Result<usize> {
        self.network()?
            .by_id
            .get(&id)
            .copied()
            .ok_or(RouteError::UnknownShop(id))
    }

    fn spatial(&self) -> Result<SpatialQueryEngine<'_>> {
        let network = self.network()?;
        Ok(SpatialQueryEngine::new(&network.shops, &network.matrices)
            .with_resolution(self.config.circle_segments, self.config.buffer_segments))
    }

    fn planner(&self) -> TourPlanner {
        TourPlanner::new(self.config.average_speed_kmh)
    }

    /// Up to `limit` shops within `max_distance_km` of `origin`, closest first.
    pub fn find_nearest(
        &self,
        origin: &Location,
        limit: usize,
        max_distance_km: f64,
    ) -> Result<Vec<NearbyShop<'_>>> {
        self.spatial()?.find_nearest(origin, limit, max_distance_km)
    }

    /// Plans a tour over shop indices, applying 2-opt when configured.
    pub fn plan_tour(&self, start: &Location, candidates: &[usize]) -> Result<Tour> {
        let network = self.network()?;
        let planner = self.planner();
        let tour = planner.plan_tour(
            start,
            candidates,
            &network.shops,
            &network.matrices.direct,
            &network.paths,
        )?;

        if self.config.two_opt {
            Ok(planner.improve_two_opt(&tour, start, &network.shops, &network.paths))
        } else {
            Ok(tour)
        }
    }

    /// Plans a tour over shop ids instead of indices.
    pub fn plan_tour_by_ids(&self, start: &Location, ids: &[i64]) -> Result<Tour> {
        let indices = ids
            .iter()
            .map(|&id| self.index_of(id))
            .collect::<Result<Vec<_>>>()?;
        self.plan_tour(start, &indices)
    }

    /// Shortest network path between two shop indices.
    pub fn shortest_path(&self, from: usize, to: usize) -> Result<ShopPath> {
        let network = self.network()?;
        let len = network.shops.len();
        for index in [from, to] {
            if index >= len {
                return Err(RouteError::IndexOutOfRange { index, len });
            }
        }

        Ok(ShopPath {
            from,
            to,
            distance_km: network.paths.distance(from, to),
            path: network.paths.reconstruct_path(from, to),
        })
    }

    pub fn find_within_polygon(&self, polygon: &Polygon) -> Result<Vec<IndexedShop<'_>>> {
        Ok(self.spatial()?.find_within_polygon(polygon))
    }

    pub fn find_along_route(&self, route: &[Location], buffer_km: f64) -> Result<CorridorQuery<'_>> {
        self.spatial()?.find_along_route(route, buffer_km)
    }

    pub fn find_within_radius(&self, center: &Location, radius_km: f64) -> Result<RadiusQuery<'_>> {
        self.spatial()?.find_within_radius(center, radius_km)
    }

    pub fn network_stats(&self) -> Result<NetworkStats> {
        Ok(self.spatial()?.network_stats())
    }
}
