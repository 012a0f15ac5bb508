// Copyright: Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Removal of the attribution is not allowed, as covered under the AGPL license

use anyhow::Context;
use clap::Parser;
use fredericton_transit::colour_correction::rgb_to_hex;
use fredericton_transit::{
    AgencyTools, FeedFixerConfig, FrederictonTransit, MissingColourPolicy, RouteColour,
    fix_gtfs_directory,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fredericton Transit GTFS cleaner", long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Rewrite an unzipped GTFS directory with the Fredericton rules
    Fix {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Warn instead of failing on routes missing from the colour table.
        /// Also enabled by LARCH_LENIENT_COLOURS.
        #[arg(long)]
        lenient_colours: bool,
    },
    /// Print the route id derived from a route short name
    RouteId { short_name: String },
    /// Print the colour of a route short name
    Colour { short_name: String },
    /// Run one of the text cleaners
    Clean {
        #[arg(value_enum)]
        kind: CleanKind,
        text: String,
        #[arg(long, default_value_t = 0)]
        direction_id: u8,
        /// The direction headsign comes from a stop name
        #[arg(long)]
        from_stop_name: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CleanKind {
    Stop,
    Trip,
    Direction,
    RouteLongName,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let agency = FrederictonTransit;

    match args.cmd {
        Command::Fix {
            input,
            output,
            lenient_colours,
        } => {
            let lenient = lenient_colours || std::env::var("LARCH_LENIENT_COLOURS").is_ok();

            let config = FeedFixerConfig {
                missing_colour_policy: match lenient {
                    true => MissingColourPolicy::Log,
                    false => MissingColourPolicy::Abort,
                },
            };

            let summary = fix_gtfs_directory(&agency, &input, &output, &config)
                .with_context(|| format!("Failed to fix GTFS in {}", input.display()))?;

            if !summary.unconfigured_routes.is_empty() {
                println!(
                    "Routes missing from the colour table: {}",
                    summary.unconfigured_routes.join(", ")
                );
            }
        }
        Command::RouteId { short_name } => {
            println!("{}", agency.route_id(&short_name)?);
        }
        Command::Colour { short_name } => match agency.route_colour(&short_name)? {
            RouteColour::Fixed(colour) => println!("{}", rgb_to_hex(colour)),
            RouteColour::AgencyDefault => println!(
                "{} (agency colour, route colour not set)",
                rgb_to_hex(agency.agency_colour())
            ),
        },
        Command::Clean {
            kind,
            text,
            direction_id,
            from_stop_name,
        } => {
            let cleaned = match kind {
                CleanKind::Stop => agency.clean_stop_name(&text),
                CleanKind::Trip => agency.clean_trip_headsign(&text),
                CleanKind::Direction => {
                    agency.clean_direction_headsign(direction_id, from_stop_name, &text)
                }
                CleanKind::RouteLongName => agency.clean_route_long_name(&text),
            };
            println!("{}", cleaned);
        }
    }

    Ok(())
}
