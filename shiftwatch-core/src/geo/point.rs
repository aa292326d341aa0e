//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Largest valid latitude magnitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest valid longitude magnitude in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// Coordinate validation errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude must be between -90 and 90 degrees, got {0}")]
    Latitude(f64),

    #[error("Longitude must be between -180 and 180 degrees, got {0}")]
    Longitude(f64),
}

/// A position on the Earth's surface, in decimal degrees.
///
/// `GeoPoint::new` accepts any value; range checks happen only where a
/// position enters the system (see [`GeoPoint::validated`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting coordinates outside [-90,90] x [-180,180].
    ///
    /// NaN fails both range checks.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(GeoPoint::new(latitude, longitude))
    }

    /// Re-run the range checks on an existing point
    pub fn validate(self) -> Result<Self, CoordinateError> {
        GeoPoint::validated(self.latitude, self.longitude)
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_meters(*self, *other)
    }

    /// Point reached by travelling `distance` meters from here along the
    /// great circle that starts at `bearing` degrees (clockwise from north).
    pub fn destination(&self, bearing: f64, distance: f64) -> GeoPoint {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let theta = bearing.to_radians();
        let delta = distance / EARTH_RADIUS_METERS;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Great-circle (haversine) distance between two points, in meters.
///
/// Defined for any finite input, including out-of-range coordinates, which
/// produce a number without geographic meaning. NaN input yields NaN.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for near-antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            GeoPoint::new(12.9716, 77.5946),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(-89.9, 179.9),
            GeoPoint::new(51.5, -0.1),
        ];
        for p in points {
            assert_eq!(distance_meters(p, p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(12.9716, 77.5946);
        let b = GeoPoint::new(13.0827, 80.2707);
        let c = GeoPoint::new(-33.8688, 151.2093);

        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-6);
        assert!((distance_meters(a, c) - distance_meters(c, a)).abs() < 1e-6);
        assert!((distance_meters(b, c) - distance_meters(c, b)).abs() < 1e-6);
    }

    #[test]
    fn test_distance_adds_along_great_circle() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = a.destination(60.0, 300_000.0);
        let c = a.destination(60.0, 800_000.0);

        let direct = distance_meters(a, c);
        let via_b = distance_meters(a, b) + distance_meters(b, c);
        assert!((direct - via_b).abs() < 0.01, "{} vs {}", direct, via_b);
        assert!((direct - 800_000.0).abs() < 0.01);
    }

    #[test]
    fn test_equator_offset_is_about_two_km() {
        let workplace = GeoPoint::new(0.0, 0.0);
        let worker = GeoPoint::new(0.0, 0.01797);

        let d = distance_meters(worker, workplace);
        assert!((d - 2000.0).abs() < 5.0, "distance was {}", d);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = distance_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_METERS).abs() < 1.0);
        assert!((d - 20_015_086.0).abs() < 1.0);
    }

    #[test]
    fn test_near_antipodal_stays_finite() {
        let d = distance_meters(GeoPoint::new(45.0, 10.0), GeoPoint::new(-45.0, -170.0));
        assert!(d.is_finite());
        assert!(d <= PI * EARTH_RADIUS_METERS + 1e-6);
    }

    #[test]
    fn test_out_of_range_input_is_still_a_number() {
        let d = distance_meters(GeoPoint::new(200.0, 0.0), GeoPoint::new(0.0, 0.0));
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_nan_input_gives_nan() {
        let d = distance_meters(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    #[test]
    fn test_validated_ranges() {
        assert!(GeoPoint::validated(90.0, 180.0).is_ok());
        assert!(GeoPoint::validated(-90.0, -180.0).is_ok());
        assert_eq!(
            GeoPoint::validated(90.5, 0.0),
            Err(CoordinateError::Latitude(90.5))
        );
        assert_eq!(
            GeoPoint::validated(0.0, -180.5),
            Err(CoordinateError::Longitude(-180.5))
        );
        assert!(GeoPoint::validated(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(200.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_destination_round_trip() {
        let start = GeoPoint::new(12.9716, 77.5946);
        let end = start.destination(135.0, 2000.0);
        assert!((start.distance_to(&end) - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_display_four_decimals() {
        let p = GeoPoint::new(12.971598, 77.594566);
        assert_eq!(p.to_string(), "12.9716, 77.5946");
    }
}
