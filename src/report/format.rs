//! Human-readable reports.

use crate::domain::{CarbonFootprintData, FootprintBreakdown, TransportTrip};
use crate::footprint::{EmissionFactors, FlightBand};

/// Format a footprint breakdown alongside the inputs that produced it.
pub fn format_footprint(data: &CarbonFootprintData, breakdown: &FootprintBreakdown) -> String {
    let mut out = String::new();

    out.push_str("=== eco - Carbon Footprint ===\n");

    let trips = data.transportation.as_deref().unwrap_or(&[]);
    out.push_str(&format!(
        "{:<16}{:>12.3} kg CO2e  ({} trip{})\n",
        "Transportation",
        breakdown.transportation,
        trips.len(),
        if trips.len() == 1 { "" } else { "s" }
    ));
    for trip in trips {
        out.push_str(&format!("  - {}\n", describe_trip(trip)));
    }

    match &data.electricity {
        Some(e) => out.push_str(&format!(
            "{:<16}{:>12.3} kg CO2e  ({} kWh)\n",
            "Electricity", breakdown.electricity, e.kwh
        )),
        None => out.push_str(&format!("{:<16}{:>12}\n", "Electricity", "-")),
    }

    match &data.diet {
        Some(d) => out.push_str(&format!(
            "{:<16}{:>12.3} kg CO2e  ({}, {} meals/day)\n",
            "Diet", breakdown.diet, d.kind, d.meals_per_day
        )),
        None => out.push_str(&format!("{:<16}{:>12}\n", "Diet", "-")),
    }

    match &data.waste {
        Some(w) => out.push_str(&format!(
            "{:<16}{:>12.3} kg CO2e  ({} kg/week)\n",
            "Waste", breakdown.waste, w.kg_per_week
        )),
        None => out.push_str(&format!("{:<16}{:>12}\n", "Waste", "-")),
    }

    out.push_str(&format!("{:<16}{:>12.3} kg CO2e\n", "Total", breakdown.total));
    out
}

/// One-line description of a trip's inputs.
pub fn describe_trip(trip: &TransportTrip) -> String {
    let mut s = format!("{} {} km", trip.kind, trip.distance);
    match trip.kind.as_str() {
        "car" => {
            s.push_str(&format!(", {}", trip.fuel_type.as_deref().unwrap_or("gasoline")));
            if let Some(p) = trip.passengers {
                s.push_str(&format!(", {p} passenger{}", if p == 1 { "" } else { "s" }));
            }
        }
        "flight" => {
            s.push_str(&format!(", {}", FlightBand::for_distance(trip.distance).display_name()));
        }
        _ => {}
    }
    s
}

/// Format a single trip result.
pub fn format_trip(trip: &TransportTrip, emissions: f64) -> String {
    format!("{}: {emissions:.3} kg CO2e", describe_trip(trip))
}

/// Format the factor table, one `category.key = value` row per factor.
pub fn format_factors(factors: &EmissionFactors) -> String {
    let mut out = String::new();
    out.push_str("Emission factors (kg CO2e per unit):\n");
    for (category, key, value) in factors.entries() {
        out.push_str(&format!("  {:<28}{value:>8.3}\n", format!("{category}.{key}")));
    }
    out
}
