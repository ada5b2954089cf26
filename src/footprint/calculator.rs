//! Emissions calculator.
//!
//! Every operation is a pure function of its inputs and the factor table the
//! calculator was built with. The only error paths are an unsupported transport
//! mode and a car trip with zero passengers; unknown fuel and diet keys are
//! substituted with their category default instead.

use tracing::debug;

use crate::domain::{CarbonFootprintData, FootprintBreakdown, TransportKind, TransportTrip};
use crate::error::AppError;
use crate::footprint::factors::{EmissionFactors, FlightBand};

#[derive(Debug, Clone, Default)]
pub struct CarbonFootprintCalculator {
    factors: EmissionFactors,
}

impl CarbonFootprintCalculator {
    /// Calculator over the standard factor table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factors(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Emissions for one journey.
    ///
    /// - `car`: `factor(fuel) * distance / passengers`
    /// - `flight`: `factor(band(distance)) * distance`; passengers are not applied
    /// - `bus` / `train`: `factor * distance`
    pub fn calculate_transport_emissions(
        &self,
        kind: &str,
        distance: f64,
        fuel_type: Option<&str>,
        passengers: Option<u32>,
    ) -> Result<f64, AppError> {
        let kind: TransportKind = kind.parse()?;

        match kind {
            TransportKind::Car => {
                let passengers = passengers.unwrap_or(1);
                if passengers == 0 {
                    return Err(AppError::new(3, "Car trips need at least one passenger."));
                }
                let lookup = self.factors.car.resolve(fuel_type);
                if lookup.is_default() {
                    debug!(fuel = ?fuel_type, "unknown car fuel, using gasoline factor");
                }
                Ok(lookup.value() * distance / f64::from(passengers))
            }
            TransportKind::Flight => {
                let band = FlightBand::for_distance(distance);
                Ok(self.factors.flight.for_band(band) * distance)
            }
            TransportKind::Bus => Ok(self.factors.public_transport.bus * distance),
            TransportKind::Train => Ok(self.factors.public_transport.train * distance),
        }
    }

    pub fn trip_emissions(&self, trip: &TransportTrip) -> Result<f64, AppError> {
        self.calculate_transport_emissions(
            &trip.kind,
            trip.distance,
            trip.fuel_type.as_deref(),
            trip.passengers,
        )
    }

    /// `kwh * average`. The region does not change the factor.
    pub fn calculate_electricity_emissions(&self, kwh: f64, region: Option<&str>) -> f64 {
        let _ = region;
        kwh * self.factors.electricity.average
    }

    pub fn calculate_diet_emissions(&self, diet_type: &str, meals_per_day: f64) -> f64 {
        let lookup = self.factors.diet.resolve(diet_type);
        if lookup.is_default() {
            debug!(diet = diet_type, "unknown diet type, using meat factor");
        }
        lookup.value() * meals_per_day
    }

    pub fn calculate_waste_emissions(&self, waste_kg: f64) -> f64 {
        waste_kg * self.factors.waste.average_per_kg
    }

    /// Per-category subtotals for `data`.
    ///
    /// Fails as a whole if any trip fails; no partial result is returned.
    pub fn calculate_breakdown(&self, data: &CarbonFootprintData) -> Result<FootprintBreakdown, AppError> {
        let mut out = FootprintBreakdown::default();

        if let Some(trips) = &data.transportation {
            for (idx, trip) in trips.iter().enumerate() {
                let value = self
                    .trip_emissions(trip)
                    .map_err(|e| AppError::new(e.exit_code(), format!("Trip {}: {e}", idx + 1)))?;
                out.transportation += value;
                out.total += value;
            }
        }

        if let Some(electricity) = &data.electricity {
            out.electricity = self.calculate_electricity_emissions(electricity.kwh, electricity.region.as_deref());
            out.total += out.electricity;
        }

        if let Some(diet) = &data.diet {
            out.diet = self.calculate_diet_emissions(&diet.kind, diet.meals_per_day);
            out.total += out.diet;
        }

        if let Some(waste) = &data.waste {
            out.waste = self.calculate_waste_emissions(waste.kg_per_week);
            out.total += out.waste;
        }

        Ok(out)
    }

    pub fn calculate_total(&self, data: &CarbonFootprintData) -> Result<f64, AppError> {
        Ok(self.calculate_breakdown(data)?.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DietData, ElectricityData, WasteData};

    fn calc() -> CarbonFootprintCalculator {
        CarbonFootprintCalculator::new()
    }

    #[test]
    fn car_trip_splits_by_passengers() {
        let v = calc()
            .calculate_transport_emissions("car", 100.0, Some("diesel"), Some(2))
            .unwrap();
        assert!((v - 8.55).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn car_trip_matches_formula_for_each_fuel() {
        let c = calc();
        for (fuel, factor) in [("gasoline", 0.192), ("diesel", 0.171), ("electric", 0.053), ("hydrogen", 0.192)] {
            for passengers in [1_u32, 3, 4] {
                let d = 237.5;
                let v = c
                    .calculate_transport_emissions("car", d, Some(fuel), Some(passengers))
                    .unwrap();
                assert_eq!(v, factor * d / f64::from(passengers), "fuel={fuel} p={passengers}");
            }
        }
    }

    #[test]
    fn car_defaults_are_gasoline_and_single_occupant() {
        let v = calc().calculate_transport_emissions("car", 50.0, None, None).unwrap();
        assert_eq!(v, 0.192 * 50.0);
    }

    #[test]
    fn car_trip_with_zero_passengers_is_rejected() {
        let err = calc()
            .calculate_transport_emissions("car", 10.0, None, Some(0))
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn flight_uses_distance_bands() {
        let c = calc();
        let at = |d: f64| c.calculate_transport_emissions("flight", d, None, None).unwrap();
        assert_eq!(at(500.0), 0.255 * 500.0);
        assert_eq!(at(501.0), 0.150 * 501.0);
        assert_eq!(at(1500.0), 0.150 * 1500.0);
        assert_eq!(at(1501.0), 0.102 * 1501.0);
        assert!((at(2000.0) - 204.0).abs() < 1e-9);
    }

    #[test]
    fn flight_ignores_passengers() {
        let c = calc();
        let solo = c.calculate_transport_emissions("flight", 800.0, None, None).unwrap();
        let shared = c.calculate_transport_emissions("flight", 800.0, None, Some(4)).unwrap();
        assert_eq!(solo, shared);
    }

    #[test]
    fn bus_and_train_are_flat_per_km() {
        let c = calc();
        assert_eq!(c.calculate_transport_emissions("bus", 20.0, None, None).unwrap(), 0.105 * 20.0);
        assert_eq!(c.calculate_transport_emissions("train", 20.0, None, None).unwrap(), 0.041 * 20.0);
    }

    #[test]
    fn unsupported_transport_type_fails() {
        let err = calc()
            .calculate_transport_emissions("tram", 10.0, None, None)
            .unwrap_err();
        assert!(err.message().contains("Unsupported transportation type"));
    }

    #[test]
    fn electricity_ignores_region() {
        let c = calc();
        assert_eq!(c.calculate_electricity_emissions(300.0, None), 150.0);
        assert_eq!(c.calculate_electricity_emissions(300.0, Some("nordic")), 150.0);
    }

    #[test]
    fn unknown_diet_falls_back_to_meat() {
        let c = calc();
        assert_eq!(
            c.calculate_diet_emissions("unknown", 2.0),
            c.calculate_diet_emissions("meat", 2.0)
        );
        assert_eq!(c.calculate_diet_emissions("vegetarian", 3.0), 2.89 * 3.0);
    }

    #[test]
    fn waste_is_half_a_kilo_per_kilo() {
        assert_eq!(calc().calculate_waste_emissions(10.0), 5.0);
    }

    #[test]
    fn empty_data_totals_zero() {
        assert_eq!(calc().calculate_total(&CarbonFootprintData::default()).unwrap(), 0.0);
    }

    #[test]
    fn total_is_exact_sum_of_categories() {
        let c = calc();
        let data = CarbonFootprintData {
            transportation: Some(vec![
                TransportTrip::new("car", 120.0).with_fuel("electric").with_passengers(3),
                TransportTrip::new("flight", 900.0),
                TransportTrip::new("train", 45.0),
            ]),
            electricity: Some(ElectricityData { kwh: 210.0, region: None }),
            diet: Some(DietData { kind: "vegan".to_string(), meals_per_day: 3.0 }),
            waste: Some(WasteData { kg_per_week: 7.0 }),
        };

        let mut expected = 0.0;
        expected += c.calculate_transport_emissions("car", 120.0, Some("electric"), Some(3)).unwrap();
        expected += c.calculate_transport_emissions("flight", 900.0, None, None).unwrap();
        expected += c.calculate_transport_emissions("train", 45.0, None, None).unwrap();
        expected += c.calculate_electricity_emissions(210.0, None);
        expected += c.calculate_diet_emissions("vegan", 3.0);
        expected += c.calculate_waste_emissions(7.0);

        let breakdown = c.calculate_breakdown(&data).unwrap();
        assert_eq!(breakdown.total, expected);
        assert_eq!(c.calculate_total(&data).unwrap(), expected);
        assert_eq!(breakdown.electricity, 105.0);
        assert_eq!(breakdown.waste, 3.5);
    }

    #[test]
    fn one_bad_trip_fails_the_whole_total() {
        let data = CarbonFootprintData {
            transportation: Some(vec![TransportTrip::new("bus", 10.0), TransportTrip::new("tram", 10.0)]),
            waste: Some(WasteData { kg_per_week: 2.0 }),
            ..Default::default()
        };
        let err = calc().calculate_total(&data).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().starts_with("Trip 2:"));
    }

    #[test]
    fn custom_factor_table_is_used() {
        let mut factors = EmissionFactors::STANDARD;
        factors.waste.average_per_kg = 1.25;
        let c = CarbonFootprintCalculator::with_factors(factors);
        assert_eq!(c.calculate_waste_emissions(4.0), 5.0);
        assert_eq!(c.factors().waste.average_per_kg, 1.25);
    }
}
