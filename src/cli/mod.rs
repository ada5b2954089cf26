//! Command-line parsing for the `eco` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! calculator and classifier code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::TransportTrip;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eco", version, about = "Carbon footprint calculator and AI waste sorter")]
pub struct Cli {
    /// Load emission factors from a JSON file instead of the built-in table.
    #[arg(long, global = true, value_name = "JSON")]
    pub factors: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Total footprint from a JSON file and/or flags, with a per-category breakdown.
    Total(TotalArgs),
    /// Emissions of a single trip.
    Trip(TripArgs),
    /// Print the active emission-factor table.
    Factors(FactorsArgs),
    /// Classify an image file as ORGANIC, RECYCLABLE, LANDFILL or ERROR.
    Classify(ClassifyArgs),
    /// Handle a raw classify request body (`{"data": ..., "mimeType": ...}`).
    Request(RequestArgs),
    /// Send the demo prompt to the model.
    Demo(ModelArgs),
}

#[derive(Debug, Args, Clone)]
pub struct TotalArgs {
    /// Footprint JSON file (`-` for stdin). Flags below add to or replace its contents.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Add a trip: TYPE:DISTANCE[:FUEL[:PASSENGERS]], e.g. `car:100:diesel:2`.
    #[arg(long = "trip", value_name = "SPEC", value_parser = parse_trip_spec)]
    pub trips: Vec<TransportTrip>,

    /// Electricity use in kWh.
    #[arg(long)]
    pub kwh: Option<f64>,

    /// Electricity region (recorded, does not change the factor).
    #[arg(long, requires = "kwh")]
    pub region: Option<String>,

    /// Diet type (meat, vegetarian, vegan).
    #[arg(long, requires = "meals")]
    pub diet: Option<String>,

    /// Meals per day for `--diet`.
    #[arg(long, requires = "diet")]
    pub meals: Option<f64>,

    /// Waste in kg per week.
    #[arg(long)]
    pub waste_kg: Option<f64>,

    /// Print JSON instead of a text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct TripArgs {
    /// Transport mode (car, flight, bus, train).
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Distance in km.
    #[arg(short, long, allow_negative_numbers = true)]
    pub distance: f64,

    /// Car fuel (gasoline, diesel, electric). Unknown values use gasoline.
    #[arg(long)]
    pub fuel: Option<String>,

    /// Car occupancy; emissions are split between passengers.
    #[arg(short, long)]
    pub passengers: Option<u32>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FactorsArgs {
    /// Print JSON (loadable with `--factors`).
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model name (overrides GEMINI_MODEL).
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ClassifyArgs {
    /// Image file to classify.
    #[arg(long, value_name = "PATH")]
    pub image: PathBuf,

    /// MIME type; inferred from the file extension when omitted.
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Fail unless the model answers with exactly one of the expected labels.
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// Request body file (`-` for stdin).
    #[arg(short = 'i', long, value_name = "JSON", default_value = "-")]
    pub input: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Parse `TYPE:DISTANCE[:FUEL[:PASSENGERS]]`.
///
/// The mode is not checked here; unsupported modes fail at calculation time like
/// any other input. An empty FUEL field leaves the fuel unset.
pub fn parse_trip_spec(spec: &str) -> Result<TransportTrip, String> {
    let fields: Vec<&str> = spec.split(':').map(str::trim).collect();
    if fields.len() < 2 || fields.len() > 4 {
        return Err(format!("expected TYPE:DISTANCE[:FUEL[:PASSENGERS]], got '{spec}'"));
    }
    if fields[0].is_empty() {
        return Err("trip type is empty".to_string());
    }

    let distance: f64 = fields[1]
        .parse()
        .map_err(|_| format!("invalid distance '{}'", fields[1]))?;
    let mut trip = TransportTrip::new(fields[0], distance);

    if let Some(fuel) = fields.get(2).filter(|f| !f.is_empty()) {
        trip = trip.with_fuel(*fuel);
    }
    if let Some(p) = fields.get(3) {
        let passengers: u32 = p.parse().map_err(|_| format!("invalid passenger count '{p}'"))?;
        trip = trip.with_passengers(passengers);
    }

    Ok(trip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_spec_full_and_minimal() {
        assert_eq!(
            parse_trip_spec("car:100:diesel:2").unwrap(),
            TransportTrip::new("car", 100.0).with_fuel("diesel").with_passengers(2)
        );
        assert_eq!(parse_trip_spec("train:12.5").unwrap(), TransportTrip::new("train", 12.5));
        assert_eq!(
            parse_trip_spec("car:40::3").unwrap(),
            TransportTrip::new("car", 40.0).with_passengers(3)
        );
    }

    #[test]
    fn trip_spec_rejects_malformed_input() {
        assert!(parse_trip_spec("car").is_err());
        assert!(parse_trip_spec("car:far").is_err());
        assert!(parse_trip_spec(":10").is_err());
        assert!(parse_trip_spec("car:10:diesel:-1").is_err());
        assert!(parse_trip_spec("car:10:diesel:2:extra").is_err());
    }

    #[test]
    fn trip_spec_leaves_mode_unchecked() {
        assert_eq!(parse_trip_spec("tram:10").unwrap().kind, "tram");
    }

    #[test]
    fn cli_parses_total_with_global_flags() {
        let cli = Cli::try_parse_from([
            "eco", "-vv", "total", "--trip", "bus:5", "--trip", "flight:700", "--diet", "vegan", "--meals", "3",
            "--factors", "f.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.factors, Some(PathBuf::from("f.json")));
        match cli.command {
            Command::Total(args) => {
                assert_eq!(args.trips.len(), 2);
                assert_eq!(args.diet.as_deref(), Some("vegan"));
                assert_eq!(args.meals, Some(3.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn diet_requires_meals() {
        assert!(Cli::try_parse_from(["eco", "total", "--diet", "meat"]).is_err());
    }

    #[test]
    fn cli_parses_classify() {
        let cli = Cli::try_parse_from(["eco", "classify", "--image", "bin.jpg", "--strict", "--model", "m"]).unwrap();
        match cli.command {
            Command::Classify(args) => {
                assert!(args.strict);
                assert_eq!(args.model.model.as_deref(), Some("m"));
                assert!(args.mime_type.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
