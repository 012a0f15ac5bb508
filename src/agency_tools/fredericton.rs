// Fredericton Transit, bus
// https://data-fredericton.opendata.arcgis.com/

use super::{AgencyTools, RouteColour, host_clean_direction_headsign};
use crate::error::AgencyToolsError;
use crate::text_cleanup::*;
use gtfs_structures::RouteType;
use language_tags::LanguageTag;
use lazy_static::lazy_static;
use regex::Regex;
use rgb::RGB;

lazy_static! {
    static ref ROUTE_ID_CLEANUP_REGEX: Regex = Regex::new(r"-\d+$").unwrap();
    static ref SUPPORTED_LANGUAGES: Vec<LanguageTag> = vec![
        LanguageTag::parse("en").unwrap(),
        LanguageTag::parse("fr").unwrap(),
    ];
}

// orange, from the logo
pub const AGENCY_COLOUR: RGB<u8> = RGB::new(0xFD, 0x66, 0x04);

pub const PARATRANSIT_ROUTE_ID: u64 = 10_000;

const IGNORED_WORDS: [&str; 2] = ["DEC", "UNB"];

const DARK_GREEN: RGB<u8> = RGB::new(0x75, 0x92, 0x3C);
const BLUE: RGB<u8> = RGB::new(0x41, 0x69, 0xE1);
const RED: RGB<u8> = RGB::new(0xE6, 0x00, 0x00);
const GREEN: RGB<u8> = RGB::new(0x32, 0xCD, 0x32);
const BROWN: RGB<u8> = RGB::new(0x99, 0x66, 0x33);
const INDIGO: RGB<u8> = RGB::new(0x4B, 0x00, 0x82);

#[derive(Clone, Copy, Debug, Default)]
pub struct FrederictonTransit;

impl AgencyTools for FrederictonTransit {
    fn agency_name(&self) -> &str {
        "Fredericton Transit"
    }

    fn supported_languages(&self) -> Vec<LanguageTag> {
        SUPPORTED_LANGUAGES.clone()
    }

    fn agency_route_type(&self) -> RouteType {
        RouteType::Bus
    }

    fn agency_colour(&self) -> RGB<u8> {
        AGENCY_COLOUR
    }

    fn route_colour(&self, route_short_name: &str) -> Result<RouteColour, AgencyToolsError> {
        let colour = match route_short_name {
            "10" | "10N" | "11" | "11S" => RouteColour::Fixed(DARK_GREEN),
            "12" | "12N" | "13" | "13S" => RouteColour::Fixed(BLUE),
            "14" | "14N" | "15" | "15S" => RouteColour::Fixed(RED),
            "16" | "16N" | "17" | "17S" => RouteColour::Fixed(GREEN),
            "18" | "20" => RouteColour::Fixed(BROWN),
            "116" | "216" => RouteColour::Fixed(INDIGO),
            "110" | "120" | "130" | "140" | "150" | "160" | "200" => RouteColour::AgencyDefault,
            _ => {
                return Err(AgencyToolsError::UnconfiguredRoute {
                    short_name: route_short_name.to_string(),
                });
            }
        };

        Ok(colour)
    }

    fn use_route_short_name_for_route_id(&self) -> bool {
        true
    }

    fn route_id_cleanup_regex(&self) -> Option<&Regex> {
        Some(&*ROUTE_ID_CLEANUP_REGEX)
    }

    fn route_id_from_unsupported_short_name(&self, route_short_name: &str) -> Option<u64> {
        match route_short_name.to_lowercase().as_str() {
            "para" => Some(PARATRANSIT_ROUTE_ID),
            _ => None,
        }
    }

    fn clean_route_long_name(&self, route_long_name: &str) -> String {
        let name = to_lower_case_upper_case_words(route_long_name, &IGNORED_WORDS);
        let name = clean_street_types(&name);
        clean_label(&name)
    }

    fn clean_trip_headsign(&self, trip_headsign: &str) -> String {
        let headsign = to_lower_case_upper_case_words(trip_headsign, &IGNORED_WORDS);
        let headsign = keep_via(&headsign);
        let headsign = clean_bounds(&headsign);
        let headsign = clean_numbers(&headsign);
        let headsign = clean_street_types(&headsign);
        clean_label(&headsign)
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        let name = to_lower_case_upper_case_words(stop_name, &IGNORED_WORDS);
        let name = clean_and(&name);
        let name = clean_at(&name);
        let name = clean_slashes(&name);
        let name = clean_bounds(&name);
        let name = clean_numbers(&name);
        let name = clean_street_types(&name);
        clean_label(&name)
    }

    fn clean_direction_headsign(
        &self,
        _direction_id: u8,
        from_stop_name: bool,
        direction_headsign: &str,
    ) -> String {
        let headsign = to_lower_case_upper_case_words(direction_headsign, &IGNORED_WORDS);
        let headsign = keep_to_and_remove_via(&headsign);
        // trips only labelled "via abc"
        let headsign = remove_via_only(&headsign);
        host_clean_direction_headsign(self, from_stop_name, &headsign)
    }

    fn direction_finder_enabled(&self) -> bool {
        true
    }
}
