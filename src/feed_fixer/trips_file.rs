use super::csv_helpers::*;
use crate::agency_tools::AgencyTools;
use crate::error::{FeedFixerError, csv_err, io_err};
use ahash::AHashMap;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct TripDirection {
    pub trip_id: String,
    pub route_id: String,
    pub direction_id: u8,
    /// trip_headsign as it came in, `None` when blank
    pub raw_headsign: Option<String>,
}

pub struct TripsResult {
    pub trips_written: usize,
    pub headsigns_changed: usize,
    pub trips_with_unknown_route: usize,
    pub directions: Vec<TripDirection>,
}

pub fn fix_trips_file<A: AgencyTools + ?Sized>(
    tools: &A,
    input: &Path,
    output: &Path,
    route_id_map: &AHashMap<String, String>,
) -> Result<TripsResult, FeedFixerError> {
    let input_path = input.join("trips.txt");
    let output_path = output.join("trips.txt");

    let mut rdr = open_reader(&input_path)?;
    let headers = headers(&mut rdr, &input_path)?;

    let route_id_idx = required_column(&headers, "route_id", "trips.txt")?;
    let trip_id_idx = required_column(&headers, "trip_id", "trips.txt")?;
    let headsign_idx = column(&headers, "trip_headsign");
    let direction_id_idx = column(&headers, "direction_id");

    let mut wtr = open_writer(&output_path)?;
    wtr.write_record(&headers)
        .map_err(|e| csv_err!("trips.txt", e))?;

    let mut result = TripsResult {
        trips_written: 0,
        headsigns_changed: 0,
        trips_with_unknown_route: 0,
        directions: Vec::new(),
    };

    for record in rdr.records() {
        let record = record.map_err(|e| csv_err!("trips.txt", e))?;
        let mut fields: Vec<String> = record.iter().map(|s| s.to_owned()).collect();

        let trip_id = field(&record, Some(trip_id_idx));
        let original_route_id = field(&record, Some(route_id_idx));

        let route_id = match route_id_map.get(original_route_id) {
            Some(route_id) => route_id.clone(),
            None => {
                warn!(
                    "Trip {} references unknown route {}",
                    trip_id, original_route_id
                );
                result.trips_with_unknown_route += 1;
                original_route_id.to_string()
            }
        };
        set_field(&mut fields, route_id_idx, route_id.clone());

        let raw_headsign = field(&record, headsign_idx);

        if let Some(idx) = headsign_idx {
            let cleaned = tools.clean_trip_headsign(raw_headsign);
            if cleaned != raw_headsign {
                result.headsigns_changed += 1;
            }
            set_field(&mut fields, idx, cleaned);
        }

        // direction_id is 0 or 1, anything else counts as 0
        let direction_id = match field(&record, direction_id_idx) {
            "1" => 1,
            _ => 0,
        };

        result.directions.push(TripDirection {
            trip_id: trip_id.to_string(),
            route_id,
            direction_id,
            raw_headsign: match raw_headsign.is_empty() {
                true => None,
                false => Some(raw_headsign.to_string()),
            },
        });

        wtr.write_record(&fields)
            .map_err(|e| csv_err!("trips.txt", e))?;
        result.trips_written += 1;
    }

    wtr.flush().map_err(|e| io_err!(output_path, e))?;

    Ok(result)
}
