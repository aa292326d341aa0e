//! Geofence Evaluation
//!
//! This module provides the great-circle distance between two coordinates
//! and the perimeter membership check built on top of it. Every place that
//! needs a distance (clock-in gate, worker status display, manager distance
//! display) goes through [`distance_meters`].
//!
//! # Features
//!
//! - Haversine distance on a sphere of mean Earth radius
//! - Inclusive perimeter check against a workplace radius
//! - Optional coordinate validation for capture and configuration boundaries
//!
//! # Example
//!
//! ```rust,ignore
//! use shiftwatch_core::geo::{distance_meters, GeoPoint};
//!
//! let workplace = GeoPoint::new(0.0, 0.0);
//! let worker = GeoPoint::new(0.0, 0.01797);
//!
//! let meters = distance_meters(worker, workplace);
//! assert!((meters - 2000.0).abs() < 5.0);
//! ```

mod perimeter;
mod point;

pub use perimeter::*;
pub use point::*;
