//! Dense distance and adjacency matrices.

use crate::error::{Result, RouteError};
use crate::shop::Shop;
use serde::Serialize;
use shopmap_geo::haversine_distance;
use tracing::debug;

/// A dense n×n matrix of kilometres stored in row-major order.
///
/// `f64::INFINITY` marks pairs with no connection.
///
/// # Examples
///
/// ```
/// use shopmap_route::SquareMatrix;
///
/// let mut m = SquareMatrix::new(2, 0.0);
/// m.set(0, 1, 4.5);
/// assert_eq!(m.get(0, 1), 4.5);
/// assert_eq!(m.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquareMatrix {
    data: Vec<f64>,
    size: usize,
}

impl SquareMatrix {
    /// Creates a matrix of the given size with every cell set to `fill`.
    pub fn new(size: usize, fill: f64) -> Self {
        Self {
            data: vec![fill; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the value at (`from`, `to`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    #[inline]
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() || b.is_infinite() {
                    if a != b {
                        return false;
                    }
                } else if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Off-diagonal cells holding a finite value.
    pub fn finite_off_diagonal(&self) -> usize {
        let mut count = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                if i != j && self.get(i, j).is_finite() {
                    count += 1;
                }
            }
        }
        count
    }
}

/// The direct great-circle matrix and its thresholded adjacency.
#[derive(Debug, Clone)]
pub struct DistanceMatrices {
    /// Direct distances between every pair of shops
    pub direct: SquareMatrix,
    /// Direct distances up to the connection threshold, infinity beyond it
    pub adjacency: SquareMatrix,
    /// Threshold the adjacency was built with
    pub max_connection_km: f64,
}

impl DistanceMatrices {
    /// Number of undirected edges in the adjacency graph.
    pub fn edge_count(&self) -> usize {
        self.adjacency.finite_off_diagonal() / 2
    }
}

/// Builds [`DistanceMatrices`] from a shop list.
#[derive(Debug, Clone, Copy)]
pub struct DistanceMatrixBuilder {
    max_connection_km: f64,
}

impl Default for DistanceMatrixBuilder {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl DistanceMatrixBuilder {
    pub fn new(max_connection_km: f64) -> Self {
        Self { max_connection_km }
    }

    /// Computes every pairwise distance once and mirrors it, so both matrices
    /// are exactly symmetric with a zero diagonal.
    pub fn build(&self, shops: &[Shop]) -> Result<DistanceMatrices> {
        if shops.is_empty() {
            return Err(RouteError::EmptyShopList);
        }
        for shop in shops {
            shop.location
                .validate()
                .map_err(|source| RouteError::InvalidShopLocation { id: shop.id, source })?;
        }

        let n = shops.len();
        let mut direct = SquareMatrix::new(n, 0.0);
        let mut adjacency = SquareMatrix::new(n, 0.0);

        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_distance(&shops[i].location, &shops[j].location);
                direct.set(i, j, d);
                direct.set(j, i, d);

                let edge = if d <= self.max_connection_km { d } else { f64::INFINITY };
                adjacency.set(i, j, edge);
                adjacency.set(j, i, edge);
            }
        }

        let matrices = DistanceMatrices {
            direct,
            adjacency,
            max_connection_km: self.max_connection_km,
        };
        debug!(
            shops = n,
            edges = matrices.edge_count(),
            max_connection_km = self.max_connection_km,
            "Built distance matrices"
        );
        Ok(matrices)
    }
}
