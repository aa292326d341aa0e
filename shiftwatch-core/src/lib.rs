//! Shiftwatch Core Library
//!
//! Platform-independent geofence evaluation and shift tracking for care
//! workers. This crate contains pure logic only: no I/O, no async runtime and
//! no clock access. Callers supply device positions and timestamps, which
//! keeps every operation deterministic and trivially testable.
//!
//! # Modules
//!
//! - [`geo`]: coordinates and the haversine geofence evaluator
//! - [`units`]: meter/kilometer conversion for presentation boundaries
//! - [`workplace`]: the active workplace configuration and its editor rules
//! - [`shift`]: clock records
//! - [`book`]: the clock-in/clock-out workflow over a set of records
//! - [`stats`]: attendance statistics for workers and managers
//! - [`status`]: distance-from-workplace display
//!
//! # Example
//!
//! ```rust,ignore
//! use shiftwatch_core::{ClockAction, GeoPoint, ShiftBook, WorkplaceSettings};
//!
//! let workplace = WorkplaceSettings::new("St. Mary's", GeoPoint::new(12.9716, 77.5946), 2000.0);
//! let mut book = ShiftBook::new();
//!
//! let action = ClockAction::at(now_ms).with_position(GeoPoint::new(12.9720, 77.5950));
//! let record = book.clock_in("worker-1", Some(&workplace), action)?;
//! assert!(record.is_active());
//! ```

pub mod book;
pub mod geo;
pub mod shift;
pub mod stats;
pub mod status;
pub mod units;
pub mod workplace;

pub use book::{ClockAction, ClockError, ShiftBook};
pub use geo::{
    distance_meters, is_within_perimeter, CoordinateError, GeoPoint, PerimeterCheck,
    EARTH_RADIUS_METERS,
};
pub use shift::{ClockEvent, ClockRecord, LocationStamp};
pub use stats::{ClockStats, DailyActivity, DashboardSummary, WorkerHours};
pub use status::LocationStatus;
pub use workplace::{WorkplaceError, WorkplaceSettings, WorkplaceUpdate};
