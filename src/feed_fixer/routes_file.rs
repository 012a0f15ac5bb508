use super::MissingColourPolicy;
use super::csv_helpers::*;
use crate::agency_tools::AgencyTools;
use crate::colour_correction::{contrasting_text_colour, parse_hex_rgb, rgb_to_hex};
use crate::error::{FeedFixerError, csv_err, io_err};
use ahash::{AHashMap, AHashSet};
use csv::StringRecord;
use gtfs_structures::RouteType;
use rgb::RGB;
use std::path::Path;
use tracing::{debug, warn};

pub struct RoutesResult {
    pub routes_written: usize,
    pub routes_merged: usize,
    pub unconfigured_routes: Vec<String>,
    /// route_id in the source feed -> route_id written out
    pub route_id_map: AHashMap<String, String>,
}

/// `route_type` as written in routes.txt
fn route_type_code(route_type: RouteType) -> i16 {
    match route_type {
        RouteType::Bus => 3,
        RouteType::Coach => 200,
        RouteType::Tramway => 0,
        RouteType::Subway => 1,
        RouteType::Rail => 2,
        RouteType::Ferry => 4,
        RouteType::CableCar => 5,
        RouteType::Gondola => 6,
        RouteType::Funicular => 7,
        RouteType::Air => 1100,
        RouteType::Taxi => 1500,
        RouteType::Other(code) => code,
    }
}

fn append_missing_column(headers: &mut StringRecord, name: &str) -> usize {
    match column(headers, name) {
        Some(idx) => idx,
        None => {
            headers.push_field(name);
            headers.len() - 1
        }
    }
}

pub fn fix_routes_file<A: AgencyTools + ?Sized>(
    tools: &A,
    input: &Path,
    output: &Path,
    missing_colour_policy: MissingColourPolicy,
) -> Result<RoutesResult, FeedFixerError> {
    let input_path = input.join("routes.txt");
    let output_path = output.join("routes.txt");

    let mut rdr = open_reader(&input_path)?;
    let mut headers = headers(&mut rdr, &input_path)?;

    let route_id_idx = required_column(&headers, "route_id", "routes.txt")?;
    let short_name_idx = required_column(&headers, "route_short_name", "routes.txt")?;
    let long_name_idx = column(&headers, "route_long_name");
    let route_type_idx = append_missing_column(&mut headers, "route_type");
    let route_color_idx = append_missing_column(&mut headers, "route_color");
    let route_text_color_idx = append_missing_column(&mut headers, "route_text_color");

    let mut wtr = open_writer(&output_path)?;
    wtr.write_record(&headers)
        .map_err(|e| csv_err!("routes.txt", e))?;

    let agency_route_type = route_type_code(tools.agency_route_type()).to_string();

    let mut result = RoutesResult {
        routes_written: 0,
        routes_merged: 0,
        unconfigured_routes: Vec::new(),
        route_id_map: AHashMap::new(),
    };
    let mut written_ids: AHashSet<String> = AHashSet::new();

    for record in rdr.records() {
        let record = record.map_err(|e| csv_err!("routes.txt", e))?;
        let mut fields: Vec<String> = record.iter().map(|s| s.to_owned()).collect();

        let original_id = field(&record, Some(route_id_idx)).to_string();
        let short_name = field(&record, Some(short_name_idx)).to_string();

        let new_id = match tools.use_route_short_name_for_route_id() {
            true => tools.route_id(&short_name)?.to_string(),
            false => original_id.clone(),
        };

        result
            .route_id_map
            .insert(original_id.clone(), new_id.clone());

        // several feed routes can collapse onto one id, `12-1` and `12-2`
        if !written_ids.insert(new_id.clone()) {
            debug!("Route {} merged into route {}", original_id, new_id);
            result.routes_merged += 1;
            continue;
        }

        set_field(&mut fields, route_id_idx, new_id);

        if let Some(idx) = long_name_idx {
            let long_name = field(&record, Some(idx));
            set_field(&mut fields, idx, tools.clean_route_long_name(long_name));
        }

        set_field(&mut fields, route_type_idx, agency_route_type.clone());

        let feed_colour = record.get(route_color_idx);
        let (colour, text_colour) = match tools.fix_colour(feed_colour) {
            Some(colour) => {
                let text_colour = record
                    .get(route_text_color_idx)
                    .and_then(parse_hex_rgb)
                    .filter(|text| *text != colour)
                    .unwrap_or_else(|| contrasting_text_colour(colour));
                (colour, text_colour)
            }
            None => {
                let colour = missing_route_colour(
                    tools,
                    &short_name,
                    missing_colour_policy,
                    &mut result.unconfigured_routes,
                )?;
                (colour, contrasting_text_colour(colour))
            }
        };

        set_field(&mut fields, route_color_idx, rgb_to_hex(colour));
        set_field(&mut fields, route_text_color_idx, rgb_to_hex(text_colour));

        wtr.write_record(&fields)
            .map_err(|e| csv_err!("routes.txt", e))?;
        result.routes_written += 1;
    }

    wtr.flush().map_err(|e| io_err!(output_path, e))?;

    Ok(result)
}

fn missing_route_colour<A: AgencyTools + ?Sized>(
    tools: &A,
    short_name: &str,
    policy: MissingColourPolicy,
    unconfigured_routes: &mut Vec<String>,
) -> Result<RGB<u8>, FeedFixerError> {
    match tools.route_colour(short_name) {
        Ok(route_colour) => Ok(route_colour.or_agency(tools.agency_colour())),
        Err(e) => match policy {
            MissingColourPolicy::Abort => Err(e.into()),
            MissingColourPolicy::Log => {
                warn!("{}, using the agency colour", e);
                unconfigured_routes.push(short_name.to_string());
                Ok(tools.agency_colour())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_type_codes() {
        assert_eq!(route_type_code(RouteType::Bus), 3);
        assert_eq!(route_type_code(RouteType::Coach), 200);
        assert_eq!(route_type_code(RouteType::Other(715)), 715);
    }

    #[test]
    fn missing_columns_are_appended_once() {
        let mut headers = StringRecord::from(vec!["route_id", "route_color"]);

        assert_eq!(append_missing_column(&mut headers, "route_color"), 1);
        assert_eq!(append_missing_column(&mut headers, "route_type"), 2);
        assert_eq!(append_missing_column(&mut headers, "route_type"), 2);
        assert_eq!(headers.len(), 3);
    }
}
