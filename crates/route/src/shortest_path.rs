//! All-pairs shortest paths over the adjacency matrix (Floyd-Warshall).

use crate::matrix::SquareMatrix;
use tracing::{debug, warn};

/// Shortest-path distances with a next-hop table for path reconstruction.
///
/// `next_hop(i, j)` is the shop to move to from `i` when heading for `j`;
/// `None` means `j` is unreachable from `i`.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    dist: SquareMatrix,
    next: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Runs Floyd-Warshall over `adjacency`.
    ///
    /// Relaxation requires a strict improvement, so when two paths are equally
    /// short the one found with the lower intermediate shop is kept.
    pub fn solve(adjacency: &SquareMatrix) -> Self {
        let n = adjacency.size();
        let mut dist = adjacency.clone();
        let mut next = vec![None; n * n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    dist.set(i, i, 0.0);
                    next[i * n + i] = Some(i);
                } else if dist.get(i, j).is_finite() {
                    next[i * n + j] = Some(j);
                }
            }
        }

        let mut relaxations = 0usize;
        for k in 0..n {
            for i in 0..n {
                let d_ik = dist.get(i, k);
                // Nothing routed through k can help a row that cannot reach k.
                if !d_ik.is_finite() {
                    continue;
                }
                for j in 0..n {
                    let d_kj = dist.get(k, j);
                    if !d_kj.is_finite() {
                        continue;
                    }
                    let through_k = d_ik + d_kj;
                    if through_k < dist.get(i, j) {
                        dist.set(i, j, through_k);
                        next[i * n + j] = next[i * n + k];
                        relaxations += 1;
                    }
                }
            }
        }

        debug!(shops = n, relaxations, "Solved all-pairs shortest paths");
        Self { dist, next }
    }

    /// Assembles a solution from precomputed tables.
    ///
    /// Returns `None` if the next-hop table does not match the matrix size.
    pub fn from_parts(dist: SquareMatrix, next: Vec<Option<usize>>) -> Option<Self> {
        if next.len() != dist.size() * dist.size() {
            return None;
        }
        Some(Self { dist, next })
    }

    pub fn size(&self) -> usize {
        self.dist.size()
    }

    /// Shortest-path distance in kilometres; infinite when unreachable or
    /// when either index is out of range.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        if from >= self.size() || to >= self.size() {
            return f64::INFINITY;
        }
        self.dist.get(from, to)
    }

    pub fn matrix(&self) -> &SquareMatrix {
        &self.dist
    }

    #[inline]
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        let n = self.size();
        if from >= n || to >= n {
            return None;
        }
        self.next[from * n + to]
    }

    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.distance(from, to).is_finite()
    }

    /// Shop indices visited on the shortest path from `from` to `to`,
    /// both ends included.
    ///
    /// `reconstruct_path(i, i)` is `[i]`. Unreachable pairs and out-of-range
    /// indices give an empty path. The walk is bounded to `n` hops, so a
    /// corrupted next-hop table with cycles yields an empty path instead of
    /// looping forever.
    pub fn reconstruct_path(&self, from: usize, to: usize) -> Vec<usize> {
        let n = self.size();
        if from >= n || to >= n {
            return Vec::new();
        }
        if from == to {
            return vec![from];
        }

        let mut path = vec![from];
        let mut current = from;
        for _ in 0..n {
            match self.next_hop(current, to) {
                Some(hop) if hop < n => {
                    path.push(hop);
                    if hop == to {
                        return path;
                    }
                    current = hop;
                }
                _ => return Vec::new(),
            }
        }

        warn!(from, to, "Path reconstruction exceeded hop bound; next-hop table is inconsistent");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    /// 0 - 1 - 2 chain where the direct 0-2 edge is missing, plus an isolated 3.
    fn chain() -> SquareMatrix {
        SquareMatrix::from_data(
            4,
            vec![
                0.0, 1.0, INF, INF, //
                1.0, 0.0, 2.0, INF, //
                INF, 2.0, 0.0, INF, //
                INF, INF, INF, 0.0,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_relaxes_through_intermediate() {
        let paths = ShortestPaths::solve(&chain());
        assert_eq!(paths.distance(0, 2), 3.0);
        assert_eq!(paths.distance(2, 0), 3.0);
        assert_eq!(paths.reconstruct_path(0, 2), vec![0, 1, 2]);
        assert_eq!(paths.reconstruct_path(2, 0), vec![2, 1, 0]);
    }

    #[test]
    fn test_shortcut_beats_direct_edge() {
        let adjacency = SquareMatrix::from_data(
            3,
            vec![
                0.0, 1.0, 10.0, //
                1.0, 0.0, 1.0, //
                10.0, 1.0, 0.0,
            ],
        )
        .unwrap();
        let paths = ShortestPaths::solve(&adjacency);
        assert_eq!(paths.distance(0, 2), 2.0);
        assert_eq!(paths.next_hop(0, 2), Some(1));
    }

    #[test]
    fn test_unreachable_stays_infinite() {
        let paths = ShortestPaths::solve(&chain());
        for i in 0..3 {
            assert!(paths.distance(i, 3).is_infinite());
            assert!(paths.distance(3, i).is_infinite());
            assert!(!paths.is_reachable(i, 3));
            assert!(paths.reconstruct_path(i, 3).is_empty());
        }
    }

    #[test]
    fn test_self_path() {
        let paths = ShortestPaths::solve(&chain());
        for i in 0..4 {
            assert_eq!(paths.distance(i, i), 0.0);
            assert_eq!(paths.reconstruct_path(i, i), vec![i]);
        }
    }

    #[test]
    fn test_out_of_range_path() {
        let paths = ShortestPaths::solve(&chain());
        assert!(paths.reconstruct_path(0, 9).is_empty());
        assert!(paths.reconstruct_path(9, 0).is_empty());
        assert!(paths.distance(0, 9).is_infinite());
        assert!(paths.distance(9, 0).is_infinite());
        assert!(!paths.is_reachable(9, 9));
        assert_eq!(paths.next_hop(0, 9), None);
        assert_eq!(paths.next_hop(9, 0), None);
    }

    #[test]
    fn test_corrupted_table_terminates() {
        // 0 -> 1 -> 0 -> ... never reaches 2
        let dist = SquareMatrix::new(3, 1.0);
        let mut next = vec![None; 9];
        next[2] = Some(1); // (0, 2)
        next[5] = Some(0); // (1, 2)
        let paths = ShortestPaths::from_parts(dist, next).unwrap();
        assert!(paths.reconstruct_path(0, 2).is_empty());
    }

    #[test]
    fn test_from_parts_size_mismatch() {
        assert!(ShortestPaths::from_parts(SquareMatrix::new(2, 0.0), vec![None; 3]).is_none());
    }

    #[test]
    fn test_empty_matrix() {
        let paths = ShortestPaths::solve(&SquareMatrix::new(0, 0.0));
        assert_eq!(paths.size(), 0);
        assert!(paths.reconstruct_path(0, 0).is_empty());
    }
}
