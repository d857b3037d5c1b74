//! Route planning over a fixed list of shops.
//!
//! This crate provides:
//! - Direct and thresholded distance matrices between shops
//! - All-pairs shortest paths with path reconstruction
//! - Nearest-neighbour tours with optional 2-opt improvement
//! - Nearest, polygon, corridor and radius queries
//! - A [`RouteOptimizer`] handle that owns the cache for one shop list
//!
//! # Example
//!
//! ```
//! use shopmap_geo::Location;
//! use shopmap_route::{OptimizerConfig, RouteOptimizer, Shop};
//!
//! let shops = vec![
//!     Shop::new(1, Location::new(-3.9778, 122.5194)),
//!     Shop::new(2, Location::new(-3.9800, 122.5200)),
//! ];
//! let optimizer = RouteOptimizer::with_shops(shops, OptimizerConfig::default()).unwrap();
//!
//! let nearest = optimizer
//!     .find_nearest(&Location::new(-3.9785, 122.5190), 1, 5.0)
//!     .unwrap();
//! assert_eq!(nearest.len(), 1);
//! ```

mod config;
mod error;
mod matrix;
mod optimizer;
mod shop;
mod shortest_path;
mod spatial;
mod tour;

pub use config::OptimizerConfig;
pub use error::{Result, RouteError, RouteErrorCode};
pub use matrix::{DistanceMatrices, DistanceMatrixBuilder, SquareMatrix};
pub use optimizer::{RouteOptimizer, ShopPath};
pub use shop::Shop;
pub use shortest_path::ShortestPaths;
pub use spatial::{CorridorQuery, IndexedShop, NearbyShop, NetworkStats, RadiusQuery, SpatialQueryEngine};
pub use tour::{LegKind, Tour, TourLeg, TourPlanner};

pub use shopmap_geo::{Location, Polygon};
