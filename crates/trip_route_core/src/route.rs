use serde::{Deserialize, Serialize};

use crate::{Destination, geo::Coordinate, guidance};

/// Legs longer than `average * DEFAULT_SPIKE_FACTOR` are reported as spikes.
pub const DEFAULT_SPIKE_FACTOR: f64 = 10.0;

/// Summary of an ordered, open route (no return leg to the start).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMetrics {
    pub legs: usize,
    pub total_km: f64,
    pub longest_km: f64,
    pub average_km: f64,
    pub spike_threshold_km: f64,
    pub spikes: usize,
    pub walking_minutes: u32,
}

impl RouteMetrics {
    pub fn from_destinations(
        route: &[Destination],
        spike_factor: f64,
        walking_speed_kmh: f64,
    ) -> Self {
        let points: Vec<Coordinate> = route.iter().map(|d| d.coordinate).collect();
        Self::from_coordinates(&points, spike_factor, walking_speed_kmh)
    }

    pub fn from_coordinates(
        points: &[Coordinate],
        spike_factor: f64,
        walking_speed_kmh: f64,
    ) -> Self {
        let n = points.len();

        if n < 2 {
            log::info!("metrics: n={n} nothing to report");
            return Self::default();
        }

        let distances = leg_distances_km(points);
        let legs = distances.len();
        let total_km: f64 = distances.iter().sum();
        let longest_km = distances.iter().copied().fold(0.0_f64, f64::max);
        let average_km = total_km / legs as f64;
        let spike_threshold_km = average_km * spike_factor;
        let spikes = distances.iter().filter(|d| **d > spike_threshold_km).count();
        let walking_minutes = guidance::walking_minutes(total_km, walking_speed_kmh);

        log::info!(
            "metrics: n={n} total_km={total_km:.3} longest_km={longest_km:.3} avg_km={average_km:.3} spike_threshold_km={spike_threshold_km:.3} spikes={spikes} walking_min={walking_minutes}",
        );

        Self {
            legs,
            total_km,
            longest_km,
            average_km,
            spike_threshold_km,
            spikes,
            walking_minutes,
        }
    }
}

/// Distance of each consecutive leg `i -> i+1`.
pub fn leg_distances_km(points: &[Coordinate]) -> Vec<f64> {
    points.windows(2).map(|w| w[0].distance_km(&w[1])).collect()
}

/// Total length of the open path through `points` in order.
pub fn path_length_km(points: &[Coordinate]) -> f64 {
    leg_distances_km(points).into_iter().sum()
}
