//! Applies an agency profile to an unzipped GTFS directory.
//!
//! routes.txt, trips.txt and stops.txt are rewritten, directions.txt is
//! added when the profile asks for the direction finder, and every other
//! file is copied as is.

mod csv_helpers;
pub mod directions;
pub mod routes_file;
pub mod stops_file;
pub mod trips_file;

use crate::agency_tools::AgencyTools;
use crate::error::{FeedFixerError, csv_err, io_err};
use ahash::{AHashMap, AHashSet};
use csv_helpers::{column, field, headers, open_reader};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const REWRITTEN_FILES: [&str; 3] = ["routes.txt", "trips.txt", "stops.txt"];

/// What to do with a route missing from the agency colour table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissingColourPolicy {
    /// Stop the run; the table needs an update first.
    #[default]
    Abort,
    /// Warn and use the agency colour.
    Log,
}

#[derive(Clone, Debug, Default)]
pub struct FeedFixerConfig {
    pub missing_colour_policy: MissingColourPolicy,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedFixerSummary {
    pub routes_written: usize,
    pub routes_merged: usize,
    pub unconfigured_routes: Vec<String>,
    pub trips_written: usize,
    pub trip_headsigns_changed: usize,
    pub stops_written: usize,
    pub stop_names_changed: usize,
    pub directions_written: usize,
    pub files_copied: usize,
}

pub fn fix_gtfs_directory<A: AgencyTools + ?Sized>(
    tools: &A,
    input: &Path,
    output: &Path,
    config: &FeedFixerConfig,
) -> Result<FeedFixerSummary, FeedFixerError> {
    if !input.is_dir() {
        return Err(FeedFixerError::MissingFile(input.display().to_string()));
    }

    fs::create_dir_all(output).map_err(|e| io_err!(output, e))?;

    // rewritten files are truncated while still being read otherwise
    let canonical_input = fs::canonicalize(input).map_err(|e| io_err!(input, e))?;
    let canonical_output = fs::canonicalize(output).map_err(|e| io_err!(output, e))?;
    if canonical_input == canonical_output {
        return Err(FeedFixerError::SameInputAndOutput(canonical_input));
    }

    info!(
        "Fixing GTFS for {} from {} into {}",
        tools.agency_name(),
        input.display(),
        output.display()
    );

    check_agency_languages(tools, input)?;

    let stops = stops_file::fix_stops_file(tools, input, output)?;
    let routes =
        routes_file::fix_routes_file(tools, input, output, config.missing_colour_policy)?;
    let trips = trips_file::fix_trips_file(tools, input, output, &routes.route_id_map)?;

    let mut summary = FeedFixerSummary {
        routes_written: routes.routes_written,
        routes_merged: routes.routes_merged,
        unconfigured_routes: routes.unconfigured_routes,
        trips_written: trips.trips_written,
        trip_headsigns_changed: trips.headsigns_changed,
        stops_written: stops.stops_written,
        stop_names_changed: stops.names_changed,
        ..Default::default()
    };

    if tools.direction_finder_enabled() {
        let trips_without_headsign: AHashSet<String> = trips
            .directions
            .iter()
            .filter(|trip| trip.raw_headsign.is_none())
            .map(|trip| trip.trip_id.clone())
            .collect();

        let last_stop_names: AHashMap<String, String> =
            directions::last_stops_of_trips(input, &trips_without_headsign)?
                .into_iter()
                .filter_map(|(trip_id, stop_id)| {
                    stops
                        .raw_stop_names
                        .get(&stop_id)
                        .map(|name| (trip_id, name.clone()))
                })
                .collect();

        let found = directions::find_directions(tools, &trips.directions, &last_stop_names);
        summary.directions_written = directions::write_directions_file(output, &found)?;
    }

    summary.files_copied =
        copy_remaining_files(input, output, tools.direction_finder_enabled())?;

    info!(
        "Wrote {} routes ({} merged), {} trips, {} stops, {} directions, copied {} files",
        summary.routes_written,
        summary.routes_merged,
        summary.trips_written,
        summary.stops_written,
        summary.directions_written,
        summary.files_copied
    );

    Ok(summary)
}

/// Warns when agency.txt declares a language the profile does not support.
fn check_agency_languages<A: AgencyTools + ?Sized>(
    tools: &A,
    input: &Path,
) -> Result<(), FeedFixerError> {
    let path = input.join("agency.txt");
    if !path.exists() {
        warn!("{} has no agency.txt", input.display());
        return Ok(());
    }

    let mut rdr = open_reader(&path)?;
    let headers = headers(&mut rdr, &path)?;
    let Some(lang_idx) = column(&headers, "agency_lang") else {
        return Ok(());
    };

    let supported = tools.supported_languages();

    for record in rdr.records() {
        let record = record.map_err(|e| csv_err!("agency.txt", e))?;
        let lang = field(&record, Some(lang_idx));

        if !lang.is_empty()
            && !supported
                .iter()
                .any(|tag| tag.primary_language().eq_ignore_ascii_case(lang))
        {
            warn!(
                "agency.txt language {} is not supported by the {} profile",
                lang,
                tools.agency_name()
            );
        }
    }

    Ok(())
}

fn copy_remaining_files(
    input: &Path,
    output: &Path,
    directions_written: bool,
) -> Result<usize, FeedFixerError> {
    let mut copied = 0;

    for entry in fs::read_dir(input).map_err(|e| io_err!(input, e))? {
        let entry = entry.map_err(|e| io_err!(input, e))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let file_name_str = file_name.to_string_lossy().to_string();
        if REWRITTEN_FILES.contains(&file_name_str.as_str())
            || (directions_written && file_name_str == "directions.txt")
        {
            continue;
        }

        fs::copy(&path, output.join(&file_name)).map_err(|e| io_err!(path, e))?;
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agency_tools::FrederictonTransit;
    use crate::error::AgencyToolsError;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fredericton-{}-{}", label, uuid::Uuid::new_v4()))
    }

    fn write_feed(dir: &Path, routes: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join("agency.txt"),
            "agency_id,agency_name,agency_url,agency_timezone,agency_lang\n\
             1,Fredericton Transit,https://www.fredericton.ca,America/Moncton,en\n",
        )
        .unwrap();
        fs::write(dir.join("routes.txt"), routes).unwrap();
        fs::write(
            dir.join("stops.txt"),
            "stop_id,stop_name,stop_lat,stop_lon\n\
             s1,REGENT AT PROSPECT EASTBOUND,45.94,-66.66\n\
             s2,UNB HEAD HALL,45.95,-66.64\n",
        )
        .unwrap();
        fs::write(
            dir.join("trips.txt"),
            "route_id,service_id,trip_id,trip_headsign,direction_id\n\
             r1,wk,t1,KINGS PLACE TO UNB VIA REGENT,0\n\
             r2,wk,t2,UNB,0\n\
             r1,wk,t3,via Downtown,1\n\
             r3,wk,t4,,1\n",
        )
        .unwrap();
        fs::write(
            dir.join("stop_times.txt"),
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
             t4,08:10:00,08:10:00,s2,2\n\
             t4,08:00:00,08:00:00,s1,1\n",
        )
        .unwrap();
        fs::write(
            dir.join("calendar.txt"),
            "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
             wk,1,1,1,1,1,0,0,20260101,20261231\n",
        )
        .unwrap();
    }

    const ROUTES: &str = "route_id,agency_id,route_short_name,route_long_name,route_type,route_color\n\
        r1,1,12,UNB - KINGS PLACE,3,\n\
        r2,1,12-4,UNB - KINGS PLACE,3,000000\n\
        r3,1,110,NORTHSIDE,3,\n\
        r4,1,PARA,PARATRANSIT,3,abcdef\n";

    #[test]
    fn fixes_a_whole_feed() {
        let input = temp_dir("input");
        let output = temp_dir("output");
        write_feed(&input, ROUTES);

        let summary = fix_gtfs_directory(
            &FrederictonTransit,
            &input,
            &output,
            &FeedFixerConfig::default(),
        )
        .unwrap();

        assert_eq!(summary.routes_written, 3);
        assert_eq!(summary.routes_merged, 1);
        assert!(summary.unconfigured_routes.is_empty());
        assert_eq!(summary.trips_written, 4);
        assert_eq!(summary.stops_written, 2);
        assert_eq!(summary.stop_names_changed, 2);
        assert_eq!(summary.directions_written, 2);
        assert_eq!(summary.files_copied, 3);

        let routes = fs::read_to_string(output.join("routes.txt")).unwrap();
        assert!(routes.starts_with(
            "route_id,agency_id,route_short_name,route_long_name,route_type,route_color,route_text_color"
        ));
        assert!(routes.contains("12,1,12,UNB - Kings Pl,3,4169E1,FFFFFF"));
        assert!(routes.contains("110,1,110,Northside,3,FD6604,FFFFFF"));
        assert!(routes.contains("10000,1,PARA,Paratransit,3,ABCDEF,000000"));
        assert!(!routes.contains("12-4,"));

        let trips = fs::read_to_string(output.join("trips.txt")).unwrap();
        assert!(trips.contains("12,wk,t1,Kings Pl to UNB via Regent,0"));
        assert!(trips.contains("12,wk,t2,UNB,0"));
        assert!(trips.contains("110,wk,t4,,1"));

        let stops = fs::read_to_string(output.join("stops.txt")).unwrap();
        assert!(stops.contains("s1,Regent / Prospect EB,45.94,-66.66"));
        assert!(stops.contains("s2,UNB Head Hall,45.95,-66.64"));

        let directions = fs::read_to_string(output.join("directions.txt")).unwrap();
        assert!(directions.contains("12,0,UNB"));
        assert!(directions.contains("110,1,UNB Head Hall"));
        assert!(!directions.contains("12,1,"));

        assert!(output.join("calendar.txt").exists());
        assert!(output.join("stop_times.txt").exists());

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    const ROUTES_WITH_UNKNOWN: &str = "route_id,agency_id,route_short_name,route_long_name,route_type,route_color\n\
        r1,1,12,UNB,3,\n\
        r2,1,99,NEW ROUTE,3,\n\
        r3,1,110,NORTHSIDE,3,\n";

    #[test]
    fn unconfigured_route_aborts_by_default() {
        let input = temp_dir("strict-input");
        let output = temp_dir("strict-output");
        write_feed(&input, ROUTES_WITH_UNKNOWN);

        let result = fix_gtfs_directory(
            &FrederictonTransit,
            &input,
            &output,
            &FeedFixerConfig::default(),
        );

        match result {
            Err(FeedFixerError::Agency(AgencyToolsError::UnconfiguredRoute { short_name })) => {
                assert_eq!(short_name, "99")
            }
            other => panic!("expected an unconfigured route error, got {:?}", other),
        }

        fs::remove_dir_all(&input).unwrap();
        let _ = fs::remove_dir_all(&output);
    }

    #[test]
    fn unconfigured_route_can_be_logged() {
        let input = temp_dir("lenient-input");
        let output = temp_dir("lenient-output");
        write_feed(&input, ROUTES_WITH_UNKNOWN);

        let config = FeedFixerConfig {
            missing_colour_policy: MissingColourPolicy::Log,
        };
        let summary = fix_gtfs_directory(&FrederictonTransit, &input, &output, &config).unwrap();

        assert_eq!(summary.unconfigured_routes, vec!["99".to_string()]);
        assert_eq!(summary.routes_written, 3);

        let routes = fs::read_to_string(output.join("routes.txt")).unwrap();
        assert!(routes.contains("99,1,99,New Route,3,FD6604,FFFFFF"));

        fs::remove_dir_all(&input).unwrap();
        fs::remove_dir_all(&output).unwrap();
    }

    #[test]
    fn refuses_to_overwrite_its_input() {
        let input = temp_dir("in-place");
        write_feed(&input, ROUTES);

        for output in [input.clone(), input.join(".")] {
            let result = fix_gtfs_directory(
                &FrederictonTransit,
                &input,
                &output,
                &FeedFixerConfig::default(),
            );
            assert!(matches!(result, Err(FeedFixerError::SameInputAndOutput(_))));
        }

        let calendar = fs::read_to_string(input.join("calendar.txt")).unwrap();
        assert!(calendar.starts_with("service_id,monday"));
        let routes = fs::read_to_string(input.join("routes.txt")).unwrap();
        assert_eq!(routes, ROUTES);

        fs::remove_dir_all(&input).unwrap();
    }

    #[test]
    fn missing_routes_file_is_reported() {
        let input = temp_dir("empty-input");
        let output = temp_dir("empty-output");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("stops.txt"), "stop_id,stop_name\ns1,A\n").unwrap();

        let result = fix_gtfs_directory(
            &FrederictonTransit,
            &input,
            &output,
            &FeedFixerConfig::default(),
        );
        assert!(matches!(result, Err(FeedFixerError::MissingFile(_))));

        fs::remove_dir_all(&input).unwrap();
        let _ = fs::remove_dir_all(&output);
    }
}
