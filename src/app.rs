//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds the calculator (optionally from a factor file)
//! - builds the model client for classification commands
//! - prints reports

use clap::Parser;
use tracing::warn;

use crate::classify::{ClassifyEndpoint, GeminiClient, GeminiConfig, GenerativeModel};
use crate::cli::{ClassifyArgs, Command, FactorsArgs, ModelArgs, RequestArgs, TotalArgs, TripArgs};
use crate::domain::{CarbonFootprintData, DietData, ElectricityData, TransportTrip, WasteData, WasteLabel};
use crate::error::AppError;
use crate::footprint::{CarbonFootprintCalculator, EmissionFactors};

/// Entry point for the `eco` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose)?;

    let factors = match &cli.factors {
        Some(path) => crate::io::read_factors_json(path)?,
        None => EmissionFactors::STANDARD,
    };
    let calculator = CarbonFootprintCalculator::with_factors(factors);

    match cli.command {
        Command::Total(args) => handle_total(&calculator, &args),
        Command::Trip(args) => handle_trip(&calculator, &args),
        Command::Factors(args) => handle_factors(&calculator, &args),
        Command::Classify(args) => {
            let endpoint = ClassifyEndpoint::new(build_model(&args.model)?);
            println!("{}", classify_image(&endpoint, &args)?);
            Ok(())
        }
        Command::Request(args) => handle_request(&args),
        Command::Demo(args) => {
            let endpoint = ClassifyEndpoint::new(build_model(&args)?);
            println!("{}", endpoint.get()?);
            Ok(())
        }
    }
}

fn handle_total(calculator: &CarbonFootprintCalculator, args: &TotalArgs) -> Result<(), AppError> {
    let data = footprint_from_args(args)?;
    if data.is_empty() {
        warn!("no activity data given; the total is zero");
    }
    let breakdown = calculator.calculate_breakdown(&data)?;

    if args.json {
        println!("{}", to_json(&breakdown)?);
    } else {
        print!("{}", crate::report::format_footprint(&data, &breakdown));
    }
    Ok(())
}

fn handle_trip(calculator: &CarbonFootprintCalculator, args: &TripArgs) -> Result<(), AppError> {
    let trip = TransportTrip {
        kind: args.kind.clone(),
        distance: args.distance,
        fuel_type: args.fuel.clone(),
        passengers: args.passengers,
    };
    let emissions = calculator.trip_emissions(&trip)?;

    if args.json {
        let out = serde_json::json!({ "trip": trip, "emissions": emissions });
        println!("{}", to_json(&out)?);
    } else {
        println!("{}", crate::report::format_trip(&trip, emissions));
    }
    Ok(())
}

fn handle_factors(calculator: &CarbonFootprintCalculator, args: &FactorsArgs) -> Result<(), AppError> {
    if args.json {
        println!("{}", to_json(calculator.factors())?);
    } else {
        print!("{}", crate::report::format_factors(calculator.factors()));
    }
    Ok(())
}

fn handle_request(args: &RequestArgs) -> Result<(), AppError> {
    // Read the body first so a bad file fails before any credential lookup.
    let body = crate::io::read_text(&args.input)?;
    let endpoint = ClassifyEndpoint::new(build_model(&args.model)?);
    println!("{}", endpoint.post(&body)?);
    Ok(())
}

/// Build the activity data for `eco total`.
///
/// Starts from `--input` (if any); `--trip` flags are appended to its trips and
/// the other category flags replace the corresponding category.
pub fn footprint_from_args(args: &TotalArgs) -> Result<CarbonFootprintData, AppError> {
    let mut data = match &args.input {
        Some(path) => crate::io::read_footprint_json(path)?,
        None => CarbonFootprintData::default(),
    };

    if !args.trips.is_empty() {
        data.transportation
            .get_or_insert_with(Vec::new)
            .extend(args.trips.iter().cloned());
    }
    if let Some(kwh) = args.kwh {
        data.electricity = Some(ElectricityData {
            kwh,
            region: args.region.clone(),
        });
    }
    if let (Some(kind), Some(meals_per_day)) = (&args.diet, args.meals) {
        data.diet = Some(DietData {
            kind: kind.clone(),
            meals_per_day,
        });
    }
    if let Some(kg_per_week) = args.waste_kg {
        data.waste = Some(WasteData { kg_per_week });
    }

    Ok(data)
}

/// Load the image named by `args`, classify it, and return the text to print.
///
/// Without `--strict` the model's answer is returned as-is (trailing whitespace
/// trimmed). With `--strict` it must be one of the expected labels.
pub fn classify_image<M: GenerativeModel>(
    endpoint: &ClassifyEndpoint<M>,
    args: &ClassifyArgs,
) -> Result<String, AppError> {
    let image = crate::io::load_image(&args.image, args.mime_type.as_deref())?;
    let text = endpoint.classify(image)?;

    if !args.strict {
        return Ok(text.trim_end().to_string());
    }

    match WasteLabel::from_response(&text) {
        Some(label) => Ok(label.to_string()),
        None => {
            warn!(response = %text, "model answer is not a sorting label");
            Err(AppError::new(
                5,
                format!("Model answered '{}', expected one of ORGANIC, RECYCLABLE, LANDFILL, ERROR.", text.trim()),
            ))
        }
    }
}

fn build_model(args: &ModelArgs) -> Result<GeminiClient, AppError> {
    let mut config = GeminiConfig::from_env()?;
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    Ok(GeminiClient::new(config))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(2, format!("Failed to encode JSON: {e}")))
}
