//! Shared domain types.
//!
//! Records are plain serde structs whose JSON field names match the wire format
//! callers already send (`type`, `fuelType`, `kWh`, `mealsPerDay`, `kgPerWeek`).
//! They are constructed once per calculation and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Supported transport modes.
///
/// Trips carry their mode as a caller-supplied string; it is parsed into this
/// enum at calculation time so that an unknown mode fails the calculation
/// rather than the input parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Car,
    Flight,
    Bus,
    Train,
}

impl TransportKind {
    pub const ALL: [TransportKind; 4] = [
        TransportKind::Car,
        TransportKind::Flight,
        TransportKind::Bus,
        TransportKind::Train,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Car => "car",
            TransportKind::Flight => "flight",
            TransportKind::Bus => "bus",
            TransportKind::Train => "train",
        }
    }
}

impl FromStr for TransportKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(TransportKind::Car),
            "flight" => Ok(TransportKind::Flight),
            "bus" => Ok(TransportKind::Bus),
            "train" => Ok(TransportKind::Train),
            other => Err(AppError::new(
                3,
                format!("Unsupported transportation type '{other}'. Expected one of: car, flight, bus, train."),
            )),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportTrip {
    /// Transport mode (`car`, `flight`, `bus`, `train`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Distance in kilometers. Not validated for sign.
    pub distance: f64,
    /// Car fuel key; absent or unknown keys use the gasoline factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    /// Occupancy used to split car emissions; defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
}

impl TransportTrip {
    pub fn new(kind: impl Into<String>, distance: f64) -> Self {
        Self {
            kind: kind.into(),
            distance,
            fuel_type: None,
            passengers: None,
        }
    }

    pub fn with_fuel(mut self, fuel: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel.into());
        self
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = Some(passengers);
        self
    }
}

/// Household electricity use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityData {
    #[serde(rename = "kWh")]
    pub kwh: f64,
    /// Accepted for forward compatibility; the flat factor ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Daily diet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietData {
    /// Diet key (`meat`, `vegetarian`, `vegan`); unknown keys use the meat factor.
    #[serde(rename = "type")]
    pub kind: String,
    pub meals_per_day: f64,
}

/// Weekly household waste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteData {
    pub kg_per_week: f64,
}

/// All activity data for one calculation. Absent categories contribute zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonFootprintData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<Vec<TransportTrip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity: Option<ElectricityData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste: Option<WasteData>,
}

impl CarbonFootprintData {
    pub fn is_empty(&self) -> bool {
        self.transportation.as_ref().is_none_or(|t| t.is_empty())
            && self.electricity.is_none()
            && self.diet.is_none()
            && self.waste.is_none()
    }
}

/// Per-category subtotals in kg CO2e.
///
/// `total` is accumulated in the same order as the categories are listed, so it
/// is bit-for-bit the value a plain running sum would produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintBreakdown {
    pub transportation: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
    pub total: f64,
}

/// Labels the sorting prompt asks the model to answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WasteLabel {
    Organic,
    Recyclable,
    Landfill,
    Error,
}

impl WasteLabel {
    pub const ALL: [WasteLabel; 4] = [
        WasteLabel::Organic,
        WasteLabel::Recyclable,
        WasteLabel::Landfill,
        WasteLabel::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WasteLabel::Organic => "ORGANIC",
            WasteLabel::Recyclable => "RECYCLABLE",
            WasteLabel::Landfill => "LANDFILL",
            WasteLabel::Error => "ERROR",
        }
    }

    /// Interpret a raw model response.
    ///
    /// Surrounding whitespace, quotes and a trailing period are ignored; anything
    /// else (extra words, other labels) yields `None`.
    pub fn from_response(text: &str) -> Option<WasteLabel> {
        let word = text
            .trim()
            .trim_end_matches('.')
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        WasteLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for WasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
