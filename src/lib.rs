// Copyright: Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Removal of the attribution is not allowed, as covered under the AGPL license

//! Fredericton Transit agency profile for GTFS cleaning, and the feed fixer
//! that applies it.

#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref
)]

pub mod agency_tools;
pub mod colour_correction;
pub mod error;
pub mod feed_fixer;
pub mod route_id;
pub mod text_cleanup;

pub use agency_tools::{AgencyTools, FrederictonTransit, RouteColour};
pub use error::{AgencyToolsError, FeedFixerError};
pub use feed_fixer::{FeedFixerConfig, FeedFixerSummary, MissingColourPolicy, fix_gtfs_directory};
