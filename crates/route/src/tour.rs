//! Visiting-order construction for a subset of shops.
//!
//! The planner is a nearest-neighbour heuristic over shortest-path distances,
//! anchored on the candidate closest to the caller's start location. An
//! optional 2-opt pass can shorten the result afterwards.

use crate::error::{Result, RouteError};
use crate::matrix::SquareMatrix;
use crate::shop::Shop;
use crate::shortest_path::ShortestPaths;
use serde::Serialize;
use shopmap_geo::{distances_from, haversine_distance, Location};
use tracing::debug;

/// How a leg's distance was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    /// Great-circle distance from the start location to the first stop
    Start,
    /// Shortest-path distance through the shop network
    ShortestPath,
    /// No network path exists; great-circle distance used instead
    Direct,
}

/// One step of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TourLeg {
    /// Shop index the leg leaves from; `None` for the start location
    pub from: Option<usize>,
    /// Shop index the leg arrives at
    pub to: usize,
    pub distance_km: f64,
    pub kind: LegKind,
}

/// An ordered visit of shops with its length and time estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    /// Shop indices in visiting order
    pub stops: Vec<usize>,
    pub legs: Vec<TourLeg>,
    pub total_distance_km: f64,
    /// Travel time at the planner's average speed, in minutes
    pub estimated_minutes: f64,
}

impl Tour {
    /// The empty tour: no stops, zero distance, zero time.
    pub fn empty() -> Self {
        Self {
            stops: Vec::new(),
            legs: Vec::new(),
            total_distance_km: 0.0,
            estimated_minutes: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Number of legs that fell back to great-circle distance.
    pub fn fallback_legs(&self) -> usize {
        self.legs.iter().filter(|leg| leg.kind == LegKind::Direct).count()
    }

    /// Shop ids in visiting order. Stops missing from `shops` are skipped.
    pub fn shop_ids(&self, shops: &[Shop]) -> Vec<i64> {
        self.stops.iter().filter_map(|&i| shops.get(i).map(|shop| shop.id)).collect()
    }

    /// Full shop sequence including intermediate shops on multi-hop legs.
    ///
    /// Direct fallback legs contribute only their destination.
    pub fn expand_path(&self, paths: &ShortestPaths) -> Vec<usize> {
        let mut sequence = Vec::new();
        for leg in &self.legs {
            match (leg.kind, leg.from) {
                (LegKind::ShortestPath, Some(from)) => {
                    let hops = paths.reconstruct_path(from, leg.to);
                    if hops.is_empty() {
                        sequence.push(leg.to);
                    } else {
                        sequence.extend(hops.into_iter().skip(1));
                    }
                }
                _ => sequence.push(leg.to),
            }
        }
        sequence
    }
}

/// Builds tours from a start location over a set of candidate shops.
#[derive(Debug, Clone, Copy)]
pub struct TourPlanner {
    average_speed_kmh: f64,
}

impl Default for TourPlanner {
    fn default() -> Self {
        Self::new(27.5)
    }
}

impl TourPlanner {
    pub fn new(average_speed_kmh: f64) -> Self {
        Self { average_speed_kmh }
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// Plans a nearest-neighbour tour.
    ///
    /// Candidates are treated as a set: duplicates are ignored and ties are
    /// broken by lowest index. When no unvisited candidate is reachable
    /// through the network, the remaining candidates are appended in index
    /// order with great-circle legs marked [`LegKind::Direct`].
    pub fn plan_tour(
        &self,
        start: &Location,
        candidates: &[usize],
        shops: &[Shop],
        direct: &SquareMatrix,
        paths: &ShortestPaths,
    ) -> Result<Tour> {
        start.validate()?;
        check_network_size(shops.len(), direct, paths)?;
        let candidates = candidate_set(candidates, shops.len())?;
        if candidates.is_empty() {
            return Ok(Tour::empty());
        }

        let locations: Vec<Location> = candidates.iter().map(|&i| shops[i].location).collect();
        let start_distances = distances_from(start, &locations);
        let (first_pos, first_distance) = start_distances
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (pos, d)| if d < best.1 { (pos, d) } else { best });

        let mut visited = vec![false; candidates.len()];
        visited[first_pos] = true;
        let mut current = candidates[first_pos];
        let mut legs = vec![TourLeg {
            from: None,
            to: current,
            distance_km: first_distance,
            kind: LegKind::Start,
        }];

        while legs.len() < candidates.len() {
            let mut best: Option<(usize, f64)> = None;
            for (pos, &candidate) in candidates.iter().enumerate() {
                if visited[pos] {
                    continue;
                }
                let d = paths.distance(current, candidate);
                if d.is_finite() && best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((pos, d));
                }
            }

            match best {
                Some((pos, d)) => {
                    visited[pos] = true;
                    legs.push(TourLeg {
                        from: Some(current),
                        to: candidates[pos],
                        distance_km: d,
                        kind: LegKind::ShortestPath,
                    });
                    current = candidates[pos];
                }
                None => {
                    let remaining = visited.iter().filter(|v| !**v).count();
                    debug!(from = current, remaining, "No network path left; appending direct legs");
                    for (pos, &candidate) in candidates.iter().enumerate() {
                        if visited[pos] {
                            continue;
                        }
                        visited[pos] = true;
                        legs.push(TourLeg {
                            from: Some(current),
                            to: candidate,
                            distance_km: direct.get(current, candidate),
                            kind: LegKind::Direct,
                        });
                        current = candidate;
                    }
                }
            }
        }

        let tour = self.assemble(legs);
        debug!(
            stops = tour.len(),
            total_km = tour.total_distance_km,
            fallback_legs = tour.fallback_legs(),
            "Planned nearest-neighbour tour"
        );
        Ok(tour)
    }

    /// Shortens a tour with 2-opt segment reversals.
    ///
    /// Only tours made entirely of network legs are improved; a tour with
    /// direct fallback legs is returned unchanged. A reversal is kept only if
    /// it strictly shortens the tour, and the start leg is re-measured when
    /// the first stop changes.
    pub fn improve_two_opt(
        &self,
        tour: &Tour,
        start: &Location,
        shops: &[Shop],
        paths: &ShortestPaths,
    ) -> Tour {
        if tour.len() < 2 || tour.fallback_legs() > 0 {
            return tour.clone();
        }
        if paths.size() != shops.len() || tour.stops.iter().any(|&i| i >= shops.len()) {
            return tour.clone();
        }

        let cost = |stops: &[usize]| -> f64 {
            let first = haversine_distance(start, &shops[stops[0]].location);
            first + stops.windows(2).map(|w| paths.distance(w[0], w[1])).sum::<f64>()
        };

        let mut stops = tour.stops.clone();
        let mut best = cost(&stops);
        let n = stops.len();
        let mut improved = true;
        let mut passes = 0;

        while improved && passes < n * n {
            improved = false;
            passes += 1;
            for i in 0..n - 1 {
                for j in (i + 1)..n {
                    stops[i..=j].reverse();
                    let candidate = cost(&stops);
                    if candidate.is_finite() && candidate < best - 1e-9 {
                        best = candidate;
                        improved = true;
                    } else {
                        stops[i..=j].reverse();
                    }
                }
            }
        }

        let mut legs = Vec::with_capacity(n);
        legs.push(TourLeg {
            from: None,
            to: stops[0],
            distance_km: haversine_distance(start, &shops[stops[0]].location),
            kind: LegKind::Start,
        });
        for w in stops.windows(2) {
            legs.push(TourLeg {
                from: Some(w[0]),
                to: w[1],
                distance_km: paths.distance(w[0], w[1]),
                kind: LegKind::ShortestPath,
            });
        }

        let improved_tour = self.assemble(legs);
        debug!(
            before_km = tour.total_distance_km,
            after_km = improved_tour.total_distance_km,
            passes,
            "Applied 2-opt"
        );
        improved_tour
    }

    fn assemble(&self, legs: Vec<TourLeg>) -> Tour {
        let total_distance_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
        Tour {
            stops: legs.iter().map(|leg| leg.to).collect(),
            legs,
            total_distance_km,
            estimated_minutes: total_distance_km / self.average_speed_kmh * 60.0,
        }
    }
}

fn check_network_size(len: usize, direct: &SquareMatrix, paths: &ShortestPaths) -> Result<()> {
    if direct.size() != len || paths.size() != len {
        return Err(RouteError::InvalidInput(format!(
            "network built for {} direct / {} shortest-path shops, but {len} shops given",
            direct.size(),
            paths.size()
        )));
    }
    Ok(())
}

/// Sorted, de-duplicated candidate indices, all within `0..len`.
fn candidate_set(candidates: &[usize], len: usize) -> Result<Vec<usize>> {
    if let Some(&index) = candidates.iter().find(|&&i| i >= len) {
        return Err(RouteError::IndexOutOfRange { index, len });
    }
    let mut set = candidates.to_vec();
    set.sort_unstable();
    set.dedup();
    Ok(set)
}
