//! Per-agency rules consumed by the feed fixer.
//!
//! [`AgencyTools`] carries the host behaviour in its default methods. A
//! profile overrides only what its agency needs.

use crate::colour_correction::fix_feed_colour;
use crate::error::AgencyToolsError;
use crate::route_id::{cleanup_route_short_name, route_id_from_short_name};
use crate::text_cleanup::clean_label;
use gtfs_structures::RouteType;
use language_tags::LanguageTag;
use regex::Regex;
use rgb::RGB;

pub mod fredericton;

pub use fredericton::FrederictonTransit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteColour {
    Fixed(RGB<u8>),
    /// Known route, colour not decided yet; the agency colour is used.
    AgencyDefault,
}

impl RouteColour {
    pub fn or_agency(self, agency_colour: RGB<u8>) -> RGB<u8> {
        match self {
            RouteColour::Fixed(colour) => colour,
            RouteColour::AgencyDefault => agency_colour,
        }
    }
}

pub trait AgencyTools {
    fn agency_name(&self) -> &str;

    fn supported_languages(&self) -> Vec<LanguageTag>;

    fn agency_route_type(&self) -> RouteType;

    fn agency_colour(&self) -> RGB<u8>;

    /// Colour given by the feed, after normalization. `None` means the feed
    /// colour is unusable and [`AgencyTools::route_colour`] decides.
    fn fix_colour(&self, colour: Option<&str>) -> Option<RGB<u8>> {
        fix_feed_colour(colour)
    }

    /// Colour for a route whose feed colour is missing.
    fn route_colour(&self, _route_short_name: &str) -> Result<RouteColour, AgencyToolsError> {
        Ok(RouteColour::AgencyDefault)
    }

    fn use_route_short_name_for_route_id(&self) -> bool {
        false
    }

    fn route_id_cleanup_regex(&self) -> Option<&Regex> {
        None
    }

    /// Hook for short names that have no numeric shape, `PARA` and the like.
    fn route_id_from_unsupported_short_name(&self, _route_short_name: &str) -> Option<u64> {
        None
    }

    fn route_id(&self, route_short_name: &str) -> Result<u64, AgencyToolsError> {
        let cleaned = cleanup_route_short_name(route_short_name, self.route_id_cleanup_regex());

        route_id_from_short_name(&cleaned)
            .or_else(|| self.route_id_from_unsupported_short_name(&cleaned))
            .ok_or_else(|| AgencyToolsError::UnsupportedRouteShortName {
                short_name: route_short_name.to_string(),
            })
    }

    fn clean_route_long_name(&self, route_long_name: &str) -> String {
        clean_label(route_long_name)
    }

    fn clean_trip_headsign(&self, trip_headsign: &str) -> String {
        clean_label(trip_headsign)
    }

    fn clean_stop_name(&self, stop_name: &str) -> String {
        clean_label(stop_name)
    }

    /// `from_stop_name` is set when the headsign was taken from the last stop
    /// of the trip rather than from a trip headsign.
    fn clean_direction_headsign(
        &self,
        _direction_id: u8,
        from_stop_name: bool,
        direction_headsign: &str,
    ) -> String {
        host_clean_direction_headsign(self, from_stop_name, direction_headsign)
    }

    fn direction_finder_enabled(&self) -> bool {
        false
    }
}

/// What the host does with a direction headsign once the profile is done
/// with it.
pub fn host_clean_direction_headsign<T: AgencyTools + ?Sized>(
    tools: &T,
    from_stop_name: bool,
    direction_headsign: &str,
) -> String {
    if from_stop_name {
        tools.clean_stop_name(direction_headsign)
    } else {
        tools.clean_trip_headsign(direction_headsign)
    }
}
