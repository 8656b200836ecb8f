use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Destination, Error, Guidance, Result,
    guidance::{self, DEFAULT_WALKING_SPEED_KMH},
    optimizer,
    route::{DEFAULT_SPIKE_FACTOR, RouteMetrics},
};

/// Fewest destinations for which optimizing a day is meaningful.
pub const MIN_DESTINATIONS_TO_OPTIMIZE: usize = 2;

const ERR_TOO_FEW_DESTINATIONS: &str = "add at least two destinations before optimizing";

/// One day of a trip: the destinations the user placed and the derived route.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub id: String,
    pub day_number: u32,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub optimized_route: Vec<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_duration_min: Option<u32>,
}

impl DayPlan {
    pub fn new(id: impl Into<String>, day_number: u32) -> Self {
        Self {
            id: id.into(),
            day_number,
            ..Self::default()
        }
    }

    pub fn add_destination(&mut self, destination: Destination) {
        self.destinations.push(destination);
        self.invalidate_route();
    }

    /// Removes the destination with `id`, returning it if it was present.
    pub fn remove_destination(&mut self, id: &str) -> Option<Destination> {
        let pos = self.destinations.iter().position(|d| d.id == id)?;
        let removed = self.destinations.remove(pos);
        self.invalidate_route();
        Some(removed)
    }

    pub fn has_optimized_route(&self) -> bool {
        !self.optimized_route.is_empty()
    }

    pub fn can_optimize(&self) -> bool {
        self.destinations.len() >= MIN_DESTINATIONS_TO_OPTIMIZE
    }

    pub fn optimize(&mut self) -> Result<&[Destination]> {
        self.optimize_with_speed(DEFAULT_WALKING_SPEED_KMH)
    }

    /// Recomputes the optimized route and its totals.
    ///
    /// Days with fewer than two destinations are rejected here; the optimizer
    /// itself would just hand them back unchanged.
    pub fn optimize_with_speed(&mut self, walking_speed_kmh: f64) -> Result<&[Destination]> {
        if !self.can_optimize() {
            log::warn!(
                "plan: day={} n={} refusing to optimize",
                self.id,
                self.destinations.len()
            );
            return Err(Error::invalid_input(ERR_TOO_FEW_DESTINATIONS));
        }

        let route = optimizer::optimize(&self.destinations);
        let metrics =
            RouteMetrics::from_destinations(&route, DEFAULT_SPIKE_FACTOR, walking_speed_kmh);

        self.optimized_route = route;
        self.route_distance_km = Some(metrics.total_km);
        self.route_duration_min = Some(metrics.walking_minutes);

        Ok(&self.optimized_route)
    }

    /// Guidance for leg `idx` of the optimized route, from stop `idx` to
    /// stop `idx + 1`.
    pub fn segment_guidance(&self, idx: usize, walking_speed_kmh: f64) -> Result<Guidance> {
        if !self.has_optimized_route() {
            return Err(Error::invalid_input(format!(
                "day {} has no optimized route",
                self.id
            )));
        }

        let legs = self.optimized_route.len().saturating_sub(1);
        match (
            self.optimized_route.get(idx),
            idx.checked_add(1).and_then(|next| self.optimized_route.get(next)),
        ) {
            (Some(from), Some(to)) => {
                Ok(guidance::guidance_with_speed(from, to, walking_speed_kmh))
            }
            _ => Err(Error::invalid_input(format!(
                "segment {idx} out of range for day {} ({legs} legs)",
                self.id
            ))),
        }
    }

    /// Guidance for every leg of the optimized route, in visiting order.
    pub fn route_guidance(&self, walking_speed_kmh: f64) -> Vec<Guidance> {
        self.optimized_route
            .windows(2)
            .map(|pair| guidance::guidance_with_speed(&pair[0], &pair[1], walking_speed_kmh))
            .collect()
    }

    fn invalidate_route(&mut self) {
        self.optimized_route.clear();
        self.route_distance_km = None;
        self.route_duration_min = None;
    }
}

/// A named trip made of independent days.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
}

impl TripPlan {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            days: Vec::new(),
        }
    }

    pub fn day(&self, id: &str) -> Result<&DayPlan> {
        self.days
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::invalid_input(format!("unknown day: {id}")))
    }

    pub fn day_mut(&mut self, id: &str) -> Result<&mut DayPlan> {
        self.days
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::invalid_input(format!("unknown day: {id}")))
    }

    /// Optimizes every day that has enough destinations, in parallel.
    ///
    /// Returns the number of days that were optimized. Days are independent,
    /// so the outcome matches optimizing them one by one.
    pub fn optimize_all(&mut self, walking_speed_kmh: f64) -> usize {
        let optimized = self
            .days
            .par_iter_mut()
            .filter(|day| {
                if day.can_optimize() {
                    return true;
                }
                log::debug!(
                    "plan: day={} n={} skipped",
                    day.id,
                    day.destinations.len()
                );
                false
            })
            .map(|day| day.optimize_with_speed(walking_speed_kmh).is_ok())
            .filter(|ok| *ok)
            .count();

        log::info!(
            "plan: trip={} days={} optimized={optimized}",
            self.id,
            self.days.len()
        );

        optimized
    }
}
