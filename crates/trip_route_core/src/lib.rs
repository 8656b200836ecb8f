//! Route ordering and walking guidance for the destinations of a trip day.
//! Distances are great-circle (haversine) distances; no road network or
//! external mapping service is involved.

mod destination;
mod error;
pub mod geo;
pub mod guidance;
mod io;
pub mod logging;
pub mod optimizer;
pub mod plan;
pub mod route;
pub mod runner;

pub use io::{input, options, output};

pub use destination::{CostItem, Destination};
pub use error::{Error, Result};
pub use geo::{Coordinate, haversine_km};
pub use guidance::{Guidance, guidance};
pub use input::RouteInput;
pub use optimizer::optimize;
pub use options::RouteOptions;
pub use plan::{DayPlan, TripPlan};
pub use route::RouteMetrics;
pub use runner::{RunOutput, run};
