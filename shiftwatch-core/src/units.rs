//! Distance Units
//!
//! Meters are the canonical unit everywhere inside the crate. Kilometers only
//! appear where a person reads or types a value, so conversion lives here and
//! never inside the geofence evaluator.

/// Meters in one kilometer
pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Convert a kilometer value from an editor into stored meters.
///
/// Rounds to whole meters: `1.001 * 1000.0` is `1000.9999999999999` before
/// rounding.
pub fn km_to_meters(km: f64) -> f64 {
    (km * METERS_PER_KILOMETER).round()
}

/// Convert stored meters into kilometers for display or editing
pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KILOMETER
}

/// Human-readable distance: whole meters below 1 km, otherwise kilometers
/// with two decimals.
pub fn format_distance(meters: f64) -> String {
    let whole = meters.round();
    if whole < METERS_PER_KILOMETER {
        format!("{:.0} m", whole)
    } else {
        format!("{:.2} km", meters_to_km(meters))
    }
}
