use serde::{Deserialize, Serialize};

use crate::Destination;

pub const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

/// Generic turn-by-turn text shown for every pair.
///
/// No road network is consulted, so the steps are the same regardless of
/// where `from` and `to` are. Only distance and time reflect the geometry.
pub const DIRECTION_STEPS: [&str; 5] = [
    "Head towards the destination",
    "Continue straight for 500m",
    "Turn right at the intersection",
    "Continue for 1.2 km",
    "Destination will be on your left",
];

/// Distance, walking time and directions between two destinations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub from_id: String,
    pub to_id: String,
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub steps: Vec<String>,
}

/// Guidance at the default walking speed.
pub fn guidance(from: &Destination, to: &Destination) -> Guidance {
    guidance_with_speed(from, to, DEFAULT_WALKING_SPEED_KMH)
}

pub fn guidance_with_speed(
    from: &Destination,
    to: &Destination,
    walking_speed_kmh: f64,
) -> Guidance {
    let distance_km = from.distance_km(to);
    let eta_minutes = walking_minutes(distance_km, walking_speed_kmh);

    log::debug!(
        "guidance: from={} to={} distance_km={distance_km:.3} eta_min={eta_minutes} speed_kmh={walking_speed_kmh}",
        from.id,
        to.id
    );

    Guidance {
        from_id: from.id.clone(),
        to_id: to.id.clone(),
        distance_km,
        eta_minutes,
        steps: DIRECTION_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Minutes needed to walk `distance_km`, rounded up.
///
/// Any positive distance takes at least one minute; zero takes zero. NaN or
/// negative results saturate to zero.
pub fn walking_minutes(distance_km: f64, walking_speed_kmh: f64) -> u32 {
    (distance_km / walking_speed_kmh * 60.0).ceil() as u32
}
