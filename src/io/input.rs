//! JSON input loading.
//!
//! Paths of `-` read from stdin so the CLI composes with pipes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::CarbonFootprintData;
use crate::error::AppError;
use crate::footprint::EmissionFactors;

/// Read the whole of `path` (or stdin for `-`) as text.
pub fn read_text(path: &Path) -> Result<String, AppError> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| AppError::new(2, format!("Failed to read stdin: {e}")))?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    }
    Ok(text)
}

fn parse_json<T: DeserializeOwned>(text: &str, what: &str, path: &Path) -> Result<T, AppError> {
    serde_json::from_str(text)
        .map_err(|e| AppError::new(2, format!("Invalid {what} JSON '{}': {e}", path.display())))
}

/// Load activity data (`CarbonFootprintData` JSON).
pub fn read_footprint_json(path: &Path) -> Result<CarbonFootprintData, AppError> {
    let text = read_text(path)?;
    parse_json(&text, "footprint", path)
}

/// Load and validate an emission-factor table.
pub fn read_factors_json(path: &Path) -> Result<EmissionFactors, AppError> {
    let text = read_text(path)?;
    let factors: EmissionFactors = parse_json(&text, "emission factor", path)?;
    factors.validate()?;
    Ok(factors)
}
