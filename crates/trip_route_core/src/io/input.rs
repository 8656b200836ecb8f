use std::{collections::HashSet, fs, io::Read};

use serde::Deserialize;

use crate::options::{InputFormat, Mode, RouteOptions};
use crate::{Destination, Error, Result, TripPlan};

/// Parsed input document for one CLI run.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteInput {
    Destinations(Vec<Destination>),
    Trip(TripPlan),
}

/// Day object form of a destination list; other day fields are ignored.
#[derive(Deserialize)]
struct DayDocument {
    destinations: Vec<Destination>,
}

impl RouteInput {
    pub fn load(options: &RouteOptions) -> Result<Self> {
        let text = read_input(options)?;
        Self::parse(&text, options.mode, options.input_format)
    }

    pub fn parse(text: &str, mode: Mode, format: InputFormat) -> Result<Self> {
        let input = match (mode, format) {
            (Mode::Trip, InputFormat::Json) => Self::Trip(parse_trip_json(text)?),
            (Mode::Trip, InputFormat::Points) => {
                return Err(Error::invalid_input("trip input must be JSON"));
            }
            (_, InputFormat::Json) => Self::Destinations(parse_destinations_json(text)?),
            (_, InputFormat::Points) => Self::Destinations(parse_points(text)?),
        };

        match &input {
            Self::Destinations(destinations) => ensure_unique_ids(destinations)?,
            Self::Trip(trip) => {
                for day in &trip.days {
                    ensure_unique_ids(&day.destinations)?;
                }
            }
        }

        log::info!("input: {}", input.summary());
        Ok(input)
    }

    fn summary(&self) -> String {
        match self {
            Self::Destinations(destinations) => format!("destinations={}", destinations.len()),
            Self::Trip(trip) => format!(
                "trip={} days={} destinations={}",
                trip.id,
                trip.days.len(),
                trip.days.iter().map(|d| d.destinations.len()).sum::<usize>()
            ),
        }
    }
}

fn read_input(options: &RouteOptions) -> Result<String> {
    match options.input_path() {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("failed to read input {}: {e}", path.display()))
        }),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Parses a bare destination array or a day object with a `destinations`
/// field. Errors point at the offending field of whichever form was given.
pub fn parse_destinations_json(text: &str) -> Result<Vec<Destination>> {
    if text.trim_start().starts_with('{') {
        let day: DayDocument = serde_json::from_str(text)?;
        return Ok(day.destinations);
    }
    Ok(serde_json::from_str(text)?)
}

pub fn parse_trip_json(text: &str) -> Result<TripPlan> {
    Ok(serde_json::from_str(text)?)
}

/// Parses whitespace separated `lat,lng` tokens into destinations with ids
/// `1..=N` in input order.
pub fn parse_points(text: &str) -> Result<Vec<Destination>> {
    let mut destinations = Vec::new();
    for (idx, tok) in text.split_whitespace().enumerate() {
        let mut it = tok.split(',');
        let lat_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing latitude", idx + 1)))?;
        let lng_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing longitude", idx + 1)))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {}: expected 'lat,lng' but got extra comma fields: {tok}",
                idx + 1
            )));
        }

        let lat: f64 = lat_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid latitude: {lat_s}", idx + 1))
        })?;
        let lng: f64 = lng_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid longitude: {lng_s}", idx + 1))
        })?;

        destinations.push(Destination::from_lat_lng((idx + 1).to_string(), lat, lng));
    }

    Ok(destinations)
}

fn ensure_unique_ids(destinations: &[Destination]) -> Result<()> {
    let mut seen = HashSet::with_capacity(destinations.len());
    for d in destinations {
        if !seen.insert(d.id.as_str()) {
            return Err(Error::invalid_data(format!(
                "duplicate destination id: {}",
                d.id
            )));
        }
    }
    Ok(())
}

/// Picks the guidance pair by id, defaulting to the first two destinations.
pub fn select_pair<'a>(
    destinations: &'a [Destination],
    from: &str,
    to: &str,
) -> Result<(&'a Destination, &'a Destination)> {
    let pick = |id: &str, fallback: usize, role: &str| -> Result<&'a Destination> {
        if id.trim().is_empty() {
            return destinations.get(fallback).ok_or_else(|| {
                Error::invalid_input(format!(
                    "guidance needs two destinations, got {}",
                    destinations.len()
                ))
            });
        }
        destinations
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::invalid_input(format!("unknown {role} destination: {id}")))
    };

    Ok((pick(from, 0, "from")?, pick(to, 1, "to")?))
}
