//! Direction finder: one rider-facing label per route and direction_id,
//! written to the `directions.txt` extension file.

use super::csv_helpers::*;
use super::trips_file::TripDirection;
use crate::agency_tools::AgencyTools;
use crate::error::{FeedFixerError, csv_err, io_err};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Last stop_id of each trip in `trip_ids`, by stop_sequence.
pub fn last_stops_of_trips(
    input: &Path,
    trip_ids: &AHashSet<String>,
) -> Result<AHashMap<String, String>, FeedFixerError> {
    let mut last_stops: AHashMap<String, (u32, String)> = AHashMap::new();

    let path = input.join("stop_times.txt");
    if trip_ids.is_empty() || !path.exists() {
        return Ok(AHashMap::new());
    }

    let mut rdr = open_reader(&path)?;
    let headers = headers(&mut rdr, &path)?;

    let trip_id_idx = required_column(&headers, "trip_id", "stop_times.txt")?;
    let stop_id_idx = required_column(&headers, "stop_id", "stop_times.txt")?;
    let sequence_idx = required_column(&headers, "stop_sequence", "stop_times.txt")?;

    for record in rdr.records() {
        let record = record.map_err(|e| csv_err!("stop_times.txt", e))?;

        let trip_id = field(&record, Some(trip_id_idx));
        if !trip_ids.contains(trip_id) {
            continue;
        }

        let Ok(sequence) = field(&record, Some(sequence_idx)).parse::<u32>() else {
            continue;
        };
        let stop_id = field(&record, Some(stop_id_idx));

        last_stops
            .entry(trip_id.to_string())
            .and_modify(|last| {
                if sequence > last.0 {
                    *last = (sequence, stop_id.to_string());
                }
            })
            .or_insert_with(|| (sequence, stop_id.to_string()));
    }

    Ok(last_stops
        .into_iter()
        .map(|(trip_id, (_, stop_id))| (trip_id, stop_id))
        .collect())
}

pub fn find_directions<A: AgencyTools + ?Sized>(
    tools: &A,
    trips: &[TripDirection],
    last_stop_names: &AHashMap<String, String>,
) -> BTreeMap<(String, u8), String> {
    let mut candidates: BTreeMap<(String, u8), Vec<String>> = BTreeMap::new();

    for trip in trips {
        let headsign = match &trip.raw_headsign {
            Some(raw) => tools.clean_direction_headsign(trip.direction_id, false, raw),
            None => match last_stop_names.get(&trip.trip_id) {
                Some(stop_name) => {
                    tools.clean_direction_headsign(trip.direction_id, true, stop_name)
                }
                None => continue,
            },
        };

        if headsign.is_empty() {
            debug!("Trip {} has no usable direction headsign", trip.trip_id);
            continue;
        }

        candidates
            .entry((trip.route_id.clone(), trip.direction_id))
            .or_default()
            .push(headsign);
    }

    candidates
        .into_iter()
        .filter_map(|(key, headsigns)| {
            // most common, ties go to the alphabetically first
            headsigns
                .into_iter()
                .counts()
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
                .map(|(headsign, _)| (key, headsign))
        })
        .collect()
}

pub fn write_directions_file(
    output: &Path,
    directions: &BTreeMap<(String, u8), String>,
) -> Result<usize, FeedFixerError> {
    let path = output.join("directions.txt");
    let mut wtr = open_writer(&path)?;

    wtr.write_record(["route_id", "direction_id", "direction"])
        .map_err(|e| csv_err!("directions.txt", e))?;

    for ((route_id, direction_id), direction) in directions {
        wtr.write_record([
            route_id.as_str(),
            direction_id.to_string().as_str(),
            direction.as_str(),
        ])
            .map_err(|e| csv_err!("directions.txt", e))?;
    }

    wtr.flush().map_err(|e| io_err!(path, e))?;

    Ok(directions.len())
}
