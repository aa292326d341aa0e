//! Perimeter membership checks.

use serde::{Deserialize, Serialize};

use super::point::{distance_meters, GeoPoint};
use crate::workplace::WorkplaceSettings;

/// Result of checking a position against a circular perimeter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterCheck {
    /// Great-circle distance from the perimeter center in meters
    pub distance_meters: f64,

    /// Whether the distance is within the radius (inclusive)
    pub within: bool,
}

impl PerimeterCheck {
    /// Check `position` against a circle of `radius_meters` around `center`.
    ///
    /// The radius is never divided by, so a zero radius only admits the
    /// center itself and a negative or NaN radius admits nothing.
    pub fn evaluate(position: GeoPoint, center: GeoPoint, radius_meters: f64) -> Self {
        let distance_meters = distance_meters(position, center);
        PerimeterCheck {
            distance_meters,
            within: distance_meters <= radius_meters,
        }
    }
}

/// Whether `worker` is inside the workplace perimeter, boundary included
pub fn is_within_perimeter(worker: GeoPoint, workplace: &WorkplaceSettings) -> bool {
    distance_meters(worker, workplace.location) <= workplace.radius_meters
}
