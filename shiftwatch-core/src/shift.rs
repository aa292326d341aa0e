//! Clock Records
//!
//! A clock record is one shift: the clock-in event, and once the worker
//! leaves, the clock-out event and the shift length. Timestamps are
//! milliseconds since the Unix epoch, supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

pub const MILLIS_PER_MINUTE: u64 = 60_000;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Where a clock event happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStamp {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl LocationStamp {
    /// Stamp `position`, labelling it with `address` or, when the device did
    /// not resolve one, the coordinates themselves.
    pub fn new(position: GeoPoint, address: Option<String>) -> Self {
        let address = address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| position.to_string());

        LocationStamp {
            latitude: position.latitude,
            longitude: position.longitude,
            address,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A clock-in or clock-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockEvent {
    /// Milliseconds since epoch
    pub at_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub location: LocationStamp,
}

/// One shift for one worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRecord {
    pub id: u64,

    pub worker_id: String,

    pub clock_in: ClockEvent,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<ClockEvent>,

    /// Whole minutes worked, set on clock-out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl ClockRecord {
    pub fn new(id: u64, worker_id: impl Into<String>, clock_in: ClockEvent) -> Self {
        ClockRecord {
            id,
            worker_id: worker_id.into(),
            clock_in,
            clock_out: None,
            duration_minutes: None,
        }
    }

    /// True until the worker clocks out
    pub fn is_active(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Close the shift and record its length in whole minutes
    pub(crate) fn complete(&mut self, clock_out: ClockEvent) {
        self.duration_minutes = Some(duration_minutes(self.clock_in.at_ms, clock_out.at_ms));
        self.clock_out = Some(clock_out);
    }

    /// Exact hours between clock-in and clock-out, `None` while active
    pub fn worked_hours(&self) -> Option<f64> {
        self.clock_out.as_ref().map(|out| {
            out.at_ms.saturating_sub(self.clock_in.at_ms) as f64 / MILLIS_PER_HOUR as f64
        })
    }

    /// UTC day number (days since epoch) of the clock-in
    pub fn clock_in_day(&self) -> u64 {
        self.clock_in.at_ms / MILLIS_PER_DAY
    }

    /// The note a manager sees: the clock-out note once the shift is over,
    /// falling back to the clock-in note.
    pub fn display_note(&self) -> Option<&str> {
        self.clock_out
            .as_ref()
            .and_then(|out| out.note.as_deref())
            .or(self.clock_in.note.as_deref())
    }
}

/// Whole minutes from `start_ms` to `end_ms`, rounded down. A clock-out that
/// precedes its clock-in counts as zero.
pub fn duration_minutes(start_ms: u64, end_ms: u64) -> u32 {
    let minutes = end_ms.saturating_sub(start_ms) / MILLIS_PER_MINUTE;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(at_ms: u64, note: Option<&str>) -> ClockEvent {
        ClockEvent {
            at_ms,
            note: note.map(str::to_string),
            location: LocationStamp::new(GeoPoint::new(12.9716, 77.5946), None),
        }
    }

    #[test]
    fn test_duration_rounds_down() {
        assert_eq!(duration_minutes(0, 59_999), 0);
        assert_eq!(duration_minutes(0, 60_000), 1);
        assert_eq!(duration_minutes(1_000, 8 * MILLIS_PER_HOUR + 30_000), 480);
    }

    #[test]
    fn test_duration_saturates_on_clock_skew() {
        assert_eq!(duration_minutes(10_000, 5_000), 0);
    }

    #[test]
    fn test_complete_sets_duration() {
        let mut record = ClockRecord::new(1, "w1", event(0, Some("morning")));
        assert!(record.is_active());
        assert_eq!(record.worked_hours(), None);

        record.complete(event(7 * MILLIS_PER_HOUR + 30 * MILLIS_PER_MINUTE, None));
        assert!(!record.is_active());
        assert_eq!(record.duration_minutes, Some(450));
        assert_eq!(record.worked_hours(), Some(7.5));
    }

    #[test]
    fn test_location_stamp_falls_back_to_coordinates() {
        let p = GeoPoint::new(12.97159, 77.59461);
        assert_eq!(LocationStamp::new(p, None).address, "12.9716, 77.5946");
        assert_eq!(
            LocationStamp::new(p, Some("  ".to_string())).address,
            "12.9716, 77.5946"
        );
        assert_eq!(
            LocationStamp::new(p, Some("Ward 4".to_string())).address,
            "Ward 4"
        );
        assert_eq!(LocationStamp::new(p, None).position(), p);
    }

    #[test]
    fn test_display_note_prefers_clock_out() {
        let mut record = ClockRecord::new(1, "w1", event(0, Some("in")));
        assert_eq!(record.display_note(), Some("in"));

        record.complete(event(MILLIS_PER_HOUR, Some("out")));
        assert_eq!(record.display_note(), Some("out"));

        let mut quiet = ClockRecord::new(2, "w1", event(0, Some("in")));
        quiet.complete(event(MILLIS_PER_HOUR, None));
        assert_eq!(quiet.display_note(), Some("in"));
    }

    #[test]
    fn test_clock_in_day() {
        let record = ClockRecord::new(1, "w1", event(3 * MILLIS_PER_DAY + 5, None));
        assert_eq!(record.clock_in_day(), 3);
    }
}
