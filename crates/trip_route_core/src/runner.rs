use crate::input::{RouteInput, select_pair};
use crate::options::{Mode, RouteOptions};
use crate::plan::MIN_DESTINATIONS_TO_OPTIMIZE;
use crate::{
    DayPlan, Destination, Error, Guidance, Result, RouteMetrics, TripPlan, guidance, optimizer,
};

/// Result of one CLI run, ready to be rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutput {
    Route(Vec<Destination>),
    Guidance(Guidance),
    Trip(TripPlan),
}

pub fn run(input: RouteInput, options: &RouteOptions) -> Result<RunOutput> {
    match (options.mode, input) {
        (Mode::Optimize, RouteInput::Destinations(destinations)) => {
            Ok(RunOutput::Route(optimize_day(destinations, options)))
        }
        (Mode::Guidance, RouteInput::Destinations(destinations)) => {
            if let Some(idx) = options.segment {
                return segment_guidance(destinations, idx, options).map(RunOutput::Guidance);
            }
            let (from, to) = select_pair(&destinations, &options.from, &options.to)?;
            Ok(RunOutput::Guidance(guidance::guidance_with_speed(
                from,
                to,
                options.walking_speed,
            )))
        }
        (Mode::Trip, RouteInput::Trip(mut trip)) => {
            trip.optimize_all(options.walking_speed);
            Ok(RunOutput::Trip(trip))
        }
        (mode, _) => Err(Error::invalid_input(format!(
            "input document does not match --mode={mode}"
        ))),
    }
}

fn optimize_day(destinations: Vec<Destination>, options: &RouteOptions) -> Vec<Destination> {
    if destinations.len() < MIN_DESTINATIONS_TO_OPTIMIZE {
        log::warn!(
            "optimizer: n={} add at least two destinations first, returning input unchanged",
            destinations.len()
        );
        return destinations;
    }

    let route = optimizer::optimize(&destinations);
    log_route_metrics(&route, options);
    route
}

/// Optimizes the destinations as one day and returns guidance for leg `idx`.
fn segment_guidance(
    destinations: Vec<Destination>,
    idx: usize,
    options: &RouteOptions,
) -> Result<Guidance> {
    let mut day = DayPlan::new("cli", 1);
    day.destinations = destinations;
    day.optimize_with_speed(options.walking_speed)?;
    day.segment_guidance(idx, options.walking_speed)
}

/// Metrics only feed the `metrics:` log line; the route output stays a plain
/// destination list.
fn log_route_metrics(route: &[Destination], options: &RouteOptions) {
    let _ = RouteMetrics::from_destinations(route, options.spike_factor, options.walking_speed);
}
