mod coordinate;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km};
