//! Emission-factor table.
//!
//! All factors are kg CO2e per unit of activity (km, kWh, meal, kg). The table is
//! a plain `Copy` value: the calculator takes one at construction and only ever
//! reads it.
//!
//! Keyed categories (car fuel, diet) resolve unknown keys to a documented default
//! through [`Lookup`], so callers can tell a matched factor from a substituted one.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound (inclusive) of the short-haul flight band, km.
pub const SHORT_HAUL_MAX_KM: f64 = 500.0;
/// Upper bound (inclusive) of the medium-haul flight band, km.
pub const MEDIUM_HAUL_MAX_KM: f64 = 1500.0;

/// Car factors per km, keyed by fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarFactors {
    pub gasoline: f64,
    pub diesel: f64,
    pub electric: f64,
}

impl CarFactors {
    pub fn get(&self, fuel: &str) -> Option<f64> {
        match fuel {
            "gasoline" => Some(self.gasoline),
            "diesel" => Some(self.diesel),
            "electric" => Some(self.electric),
            _ => None,
        }
    }

    /// Resolve a fuel key, falling back to gasoline.
    pub fn resolve(&self, fuel: Option<&str>) -> Lookup {
        lookup_or(fuel, |k| self.get(k), self.gasoline)
    }
}

/// Flight factors per km, keyed by distance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightFactors {
    pub short_haul: f64,
    pub medium_haul: f64,
    pub long_haul: f64,
}

impl FlightFactors {
    pub fn for_band(&self, band: FlightBand) -> f64 {
        match band {
            FlightBand::ShortHaul => self.short_haul,
            FlightBand::MediumHaul => self.medium_haul,
            FlightBand::LongHaul => self.long_haul,
        }
    }
}

/// Flight distance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlightBand {
    ShortHaul,
    MediumHaul,
    LongHaul,
}

impl FlightBand {
    /// Band for a flight distance. Upper bounds are inclusive.
    pub fn for_distance(distance_km: f64) -> FlightBand {
        if distance_km <= SHORT_HAUL_MAX_KM {
            FlightBand::ShortHaul
        } else if distance_km <= MEDIUM_HAUL_MAX_KM {
            FlightBand::MediumHaul
        } else {
            FlightBand::LongHaul
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FlightBand::ShortHaul => "short-haul",
            FlightBand::MediumHaul => "medium-haul",
            FlightBand::LongHaul => "long-haul",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublicTransportFactors {
    pub bus: f64,
    pub train: f64,
}

/// Electricity factor per kWh. There is a single flat value for every region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityFactors {
    pub average: f64,
}

/// Diet factors per meal, keyed by diet type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DietFactors {
    pub meat: f64,
    pub vegetarian: f64,
    pub vegan: f64,
}

impl DietFactors {
    pub fn get(&self, diet: &str) -> Option<f64> {
        match diet {
            "meat" => Some(self.meat),
            "vegetarian" => Some(self.vegetarian),
            "vegan" => Some(self.vegan),
            _ => None,
        }
    }

    /// Resolve a diet key, falling back to meat (the highest-impact diet).
    pub fn resolve(&self, diet: &str) -> Lookup {
        lookup_or(Some(diet), |k| self.get(k), self.meat)
    }
}

/// Waste factor per kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteFactors {
    pub average_per_kg: f64,
}

/// The complete coefficient table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionFactors {
    pub car: CarFactors,
    pub flight: FlightFactors,
    pub public_transport: PublicTransportFactors,
    pub electricity: ElectricityFactors,
    pub diet: DietFactors,
    pub waste: WasteFactors,
}

impl EmissionFactors {
    pub const STANDARD: EmissionFactors = EmissionFactors {
        car: CarFactors {
            gasoline: 0.192,
            diesel: 0.171,
            electric: 0.053,
        },
        flight: FlightFactors {
            short_haul: 0.255,
            medium_haul: 0.150,
            long_haul: 0.102,
        },
        public_transport: PublicTransportFactors {
            bus: 0.105,
            train: 0.041,
        },
        electricity: ElectricityFactors { average: 0.5 },
        diet: DietFactors {
            meat: 6.61,
            vegetarian: 2.89,
            vegan: 2.09,
        },
        waste: WasteFactors { average_per_kg: 0.5 },
    };

    /// Every factor as `(category, key, value)`, in table order.
    pub fn entries(&self) -> Vec<(&'static str, &'static str, f64)> {
        vec![
            ("car", "gasoline", self.car.gasoline),
            ("car", "diesel", self.car.diesel),
            ("car", "electric", self.car.electric),
            ("flight", "shortHaul", self.flight.short_haul),
            ("flight", "mediumHaul", self.flight.medium_haul),
            ("flight", "longHaul", self.flight.long_haul),
            ("publicTransport", "bus", self.public_transport.bus),
            ("publicTransport", "train", self.public_transport.train),
            ("electricity", "average", self.electricity.average),
            ("diet", "meat", self.diet.meat),
            ("diet", "vegetarian", self.diet.vegetarian),
            ("diet", "vegan", self.diet.vegan),
            ("waste", "averagePerKg", self.waste.average_per_kg),
        ]
    }

    /// Reject tables with negative or non-finite factors.
    pub fn validate(&self) -> Result<(), AppError> {
        for (category, key, value) in self.entries() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::new(
                    2,
                    format!("Invalid emission factor {category}.{key} = {value}; factors must be finite and >= 0."),
                ));
            }
        }
        Ok(())
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Outcome of a keyed factor lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup {
    /// The key was present in the table.
    Matched(f64),
    /// The key was absent or unknown; the category default was used.
    Defaulted(f64),
}

impl Lookup {
    pub fn value(self) -> f64 {
        match self {
            Lookup::Matched(v) | Lookup::Defaulted(v) => v,
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, Lookup::Defaulted(_))
    }
}

/// Look `key` up with `table`, substituting `default` when the key is missing or unknown.
///
/// A factor of `0.0` is a valid match.
pub fn lookup_or(key: Option<&str>, table: impl Fn(&str) -> Option<f64>, default: f64) -> Lookup {
    match key.and_then(table) {
        Some(v) => Lookup::Matched(v),
        None => Lookup::Defaulted(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_band_upper_bounds_are_inclusive() {
        assert_eq!(FlightBand::for_distance(0.0), FlightBand::ShortHaul);
        assert_eq!(FlightBand::for_distance(500.0), FlightBand::ShortHaul);
        assert_eq!(FlightBand::for_distance(501.0), FlightBand::MediumHaul);
        assert_eq!(FlightBand::for_distance(1500.0), FlightBand::MediumHaul);
        assert_eq!(FlightBand::for_distance(1500.5), FlightBand::LongHaul);
    }

    #[test]
    fn car_lookup_falls_back_to_gasoline() {
        let car = EmissionFactors::STANDARD.car;
        assert_eq!(car.resolve(Some("diesel")), Lookup::Matched(0.171));
        assert_eq!(car.resolve(Some("average")), Lookup::Defaulted(0.192));
        assert_eq!(car.resolve(None), Lookup::Defaulted(0.192));
    }

    #[test]
    fn zero_factor_is_not_treated_as_missing() {
        let mut factors = EmissionFactors::STANDARD;
        factors.car.electric = 0.0;
        let lookup = factors.car.resolve(Some("electric"));
        assert_eq!(lookup, Lookup::Matched(0.0));
        assert!(!lookup.is_default());
    }

    #[test]
    fn diet_lookup_falls_back_to_meat() {
        let diet = EmissionFactors::STANDARD.diet;
        assert_eq!(diet.resolve("vegan").value(), 2.09);
        assert!(diet.resolve("pescatarian").is_default());
        assert_eq!(diet.resolve("pescatarian").value(), 6.61);
    }

    #[test]
    fn table_json_uses_camel_case_keys() {
        let json = serde_json::to_value(EmissionFactors::STANDARD).unwrap();
        assert_eq!(json["flight"]["shortHaul"], 0.255);
        assert_eq!(json["publicTransport"]["train"], 0.041);
        assert_eq!(json["waste"]["averagePerKg"], 0.5);

        let back: EmissionFactors = serde_json::from_value(json).unwrap();
        assert_eq!(back, EmissionFactors::STANDARD);
    }

    #[test]
    fn validate_rejects_negative_factor() {
        assert!(EmissionFactors::STANDARD.validate().is_ok());

        let mut factors = EmissionFactors::STANDARD;
        factors.diet.vegan = -1.0;
        let err = factors.validate().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("diet.vegan"));
    }
}
