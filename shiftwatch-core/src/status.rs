//! Location status shown to a worker before clocking in, and to a manager
//! checking their own distance from the configured workplace.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::units::format_distance;
use crate::workplace::WorkplaceSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    pub distance_meters: f64,
    pub within_perimeter: bool,
    pub radius_meters: f64,
    /// Distance formatted for display, e.g. "153 m" or "2.35 km"
    pub distance_display: String,
}

impl LocationStatus {
    pub fn evaluate(position: GeoPoint, workplace: &WorkplaceSettings) -> Self {
        let check = workplace.check(position);
        LocationStatus {
            distance_meters: check.distance_meters,
            within_perimeter: check.within,
            radius_meters: workplace.radius_meters,
            distance_display: format_distance(check.distance_meters),
        }
    }

    /// Meters left before reaching the perimeter, zero when inside
    pub fn meters_to_perimeter(&self) -> f64 {
        (self.distance_meters - self.radius_meters).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_inside() {
        let site = WorkplaceSettings::new("Clinic", GeoPoint::new(12.9716, 77.5946), 2000.0);
        let status = LocationStatus::evaluate(site.location.destination(180.0, 153.0), &site);

        assert!(status.within_perimeter);
        assert_eq!(status.distance_display, "153 m");
        assert_eq!(status.meters_to_perimeter(), 0.0);
    }

    #[test]
    fn test_status_outside() {
        let site = WorkplaceSettings::new("Clinic", GeoPoint::new(0.0, 0.0), 2000.0);
        let status = LocationStatus::evaluate(site.location.destination(90.0, 3500.0), &site);

        assert!(!status.within_perimeter);
        assert_eq!(status.distance_display, "3.50 km");
        assert!((status.meters_to_perimeter() - 1500.0).abs() < 1e-6);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let site = WorkplaceSettings::new("Clinic", GeoPoint::new(0.0, 0.0), 2000.0);
        let value = serde_json::to_value(LocationStatus::evaluate(site.location, &site)).unwrap();
        assert_eq!(value["withinPerimeter"], true);
        assert_eq!(value["distanceMeters"], 0.0);
        assert_eq!(value["radiusMeters"], 2000.0);
    }
}
