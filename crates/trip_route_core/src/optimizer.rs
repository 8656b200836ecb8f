//! Nearest-neighbor visiting order for a day's destinations.
//!
//! This is a greedy heuristic, not an exact TSP solver: it starts from the
//! first destination and always walks to the closest unvisited one. There is
//! no 2-opt pass and no optimality guarantee, only a deterministic ordering
//! that is usually far better than an arbitrary one. Complexity is O(N²),
//! which is fine for the handful of stops that fit in one day.

use crate::{Destination, geo::Coordinate, route};

/// Reorders `destinations` by the nearest-neighbor heuristic.
///
/// The result holds exactly the input destinations (cloned, none added or
/// dropped). Inputs with fewer than three entries come back in input order.
pub fn optimize(destinations: &[Destination]) -> Vec<Destination> {
    let points: Vec<Coordinate> = destinations.iter().map(|d| d.coordinate).collect();

    let invalid = points.iter().filter(|p| !p.is_valid()).count();
    if invalid > 0 {
        log::warn!("optimizer: n={} invalid_coordinates={invalid}", points.len());
    }

    let order = nearest_neighbor_order(&points);

    if log::log_enabled!(log::Level::Debug) && points.len() > 2 {
        let ordered: Vec<Coordinate> = order.iter().map(|&idx| points[idx]).collect();
        log::debug!(
            "optimizer: n={} before_km={:.3} after_km={:.3}",
            points.len(),
            route::path_length_km(&points),
            route::path_length_km(&ordered)
        );
    }

    order
        .into_iter()
        .map(|idx| destinations[idx].clone())
        .collect()
}

/// Nearest-neighbor visiting order as indices into `points`.
///
/// Starts at index 0. Ties go to the earliest remaining index. A NaN distance
/// never counts as smaller, so non-finite input still yields a permutation.
pub fn nearest_neighbor_order(points: &[Coordinate]) -> Vec<usize> {
    let n = points.len();
    if n <= 2 {
        return (0..n).collect();
    }

    let mut order = Vec::with_capacity(n);
    let mut remaining: Vec<usize> = (1..n).collect();
    let mut current = 0;
    order.push(current);

    while !remaining.is_empty() {
        let from = points[current];
        let mut nearest_pos = 0;
        let mut min_distance = from.distance_km(&points[remaining[0]]);

        for (pos, &idx) in remaining.iter().enumerate().skip(1) {
            let distance = from.distance_km(&points[idx]);
            if distance < min_distance {
                min_distance = distance;
                nearest_pos = pos;
            }
        }

        current = remaining.remove(nearest_pos);
        order.push(current);
    }

    order
}
