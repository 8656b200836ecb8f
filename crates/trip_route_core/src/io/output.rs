use std::{fmt::Write as _, fs, io::Write};

use crate::options::{OutputFormat, RouteOptions};
use crate::runner::RunOutput;
use crate::{Destination, Error, Guidance, Result, TripPlan};

impl RunOutput {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(match self {
                Self::Route(route) => serde_json::to_string_pretty(route)?,
                Self::Guidance(guidance) => serde_json::to_string_pretty(guidance)?,
                Self::Trip(trip) => serde_json::to_string_pretty(trip)?,
            }),
            OutputFormat::Text => Ok(match self {
                Self::Route(route) => route_text(route),
                Self::Guidance(guidance) => guidance_text(guidance),
                Self::Trip(trip) => trip_text(trip),
            }),
        }
    }
}

/// Writes `text` to `--output`, or stdout when none is set.
pub fn write_output(options: &RouteOptions, text: &str) -> Result<()> {
    match options.output_path() {
        Some(path) => fs::write(path, text).map_err(|e| {
            Error::other(format!("failed to write output {}: {e}", path.display()))
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn route_text(route: &[Destination]) -> String {
    let mut out = String::new();
    for d in route {
        let _ = writeln!(out, "{} {}", d.id, d.coordinate);
    }
    out
}

fn guidance_text(guidance: &Guidance) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "from: {}", guidance.from_id);
    let _ = writeln!(out, "to: {}", guidance.to_id);
    let _ = writeln!(out, "distance: {:.2} km", guidance.distance_km);
    let _ = writeln!(out, "time: {} min", guidance.eta_minutes);
    for (idx, step) in guidance.steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {step}", idx + 1);
    }
    out
}

fn trip_text(trip: &TripPlan) -> String {
    let mut out = String::new();
    for day in &trip.days {
        let route = if day.has_optimized_route() {
            &day.optimized_route
        } else {
            &day.destinations
        };
        let _ = write!(out, "day {} ({})", day.day_number, day.id);
        if let (Some(km), Some(min)) = (day.route_distance_km, day.route_duration_min) {
            let _ = write!(out, " {km:.2} km {min} min");
        }
        out.push('\n');
        out.push_str(&route_text(route));
    }
    out
}
