//! Shift Book
//!
//! Holds clock records and applies the clock-in/clock-out rules:
//!
//! - a worker needs a device position to clock in or out
//! - clock-in is gated by the workplace perimeter, clock-out is not
//! - a worker has at most one active record at a time
//!
//! The book itself does no locking; a server shares it behind a lock so
//! that the one-active-record rule holds across concurrent requests.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::geo::{CoordinateError, GeoPoint};
use crate::shift::{ClockEvent, ClockRecord, LocationStamp};
use crate::workplace::WorkplaceSettings;

/// Clock workflow errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    #[error("Location required: enable location services and try again")]
    LocationRequired,

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] CoordinateError),

    #[error("No workplace has been configured")]
    NoWorkplace,

    #[error(
        "You must be within the workplace perimeter to clock in \
         ({distance_meters:.0} m away, perimeter is {radius_meters:.0} m)"
    )]
    OutsidePerimeter {
        distance_meters: f64,
        radius_meters: f64,
    },

    #[error("Already clocked in (record {record_id})")]
    AlreadyClockedIn { record_id: u64 },

    #[error("Clock record {0} not found")]
    RecordNotFound(u64),

    #[error("Clock record {0} belongs to another worker")]
    NotOwner(u64),

    #[error("Clock record {0} is already clocked out")]
    NotClockedIn(u64),
}

/// What the worker's device reports when they press clock in or out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockAction {
    /// Device position, `None` when location services are unavailable
    pub position: Option<GeoPoint>,
    pub note: Option<String>,
    pub address: Option<String>,
    /// Milliseconds since epoch
    pub at_ms: u64,
}

impl ClockAction {
    pub fn at(at_ms: u64) -> Self {
        ClockAction {
            at_ms,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    fn into_event(self) -> Result<(ClockEvent, GeoPoint), ClockError> {
        let position = self.position.ok_or(ClockError::LocationRequired)?.validate()?;
        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let event = ClockEvent {
            at_ms: self.at_ms,
            note,
            location: LocationStamp::new(position, self.address),
        };
        Ok((event, position))
    }
}

/// In-memory collection of clock records
#[derive(Debug, Clone, Default)]
pub struct ShiftBook {
    records: BTreeMap<u64, ClockRecord>,
    next_id: u64,
}

impl ShiftBook {
    pub fn new() -> Self {
        ShiftBook {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Start a shift for `worker_id`.
    ///
    /// Checks run in order: position present and in range, no shift already
    /// open, workplace configured, position inside the perimeter.
    pub fn clock_in(
        &mut self,
        worker_id: &str,
        workplace: Option<&WorkplaceSettings>,
        action: ClockAction,
    ) -> Result<&ClockRecord, ClockError> {
        let (event, position) = action.into_event()?;

        if let Some(active) = self.active_record_for(worker_id) {
            return Err(ClockError::AlreadyClockedIn {
                record_id: active.id,
            });
        }

        let workplace = workplace.ok_or(ClockError::NoWorkplace)?;
        let check = workplace.check(position);
        if !check.within {
            return Err(ClockError::OutsidePerimeter {
                distance_meters: check.distance_meters,
                radius_meters: workplace.radius_meters,
            });
        }

        let id = self.allocate_id();
        let record = self
            .records
            .entry(id)
            .or_insert_with(|| ClockRecord::new(id, worker_id, event));
        Ok(record)
    }

    /// Close the open shift `record_id` for `worker_id`
    pub fn clock_out(
        &mut self,
        worker_id: &str,
        record_id: u64,
        action: ClockAction,
    ) -> Result<&ClockRecord, ClockError> {
        let record = self
            .records
            .get_mut(&record_id)
            .ok_or(ClockError::RecordNotFound(record_id))?;
        if record.worker_id != worker_id {
            return Err(ClockError::NotOwner(record_id));
        }
        if !record.is_active() {
            return Err(ClockError::NotClockedIn(record_id));
        }

        let (event, _) = action.into_event()?;
        record.complete(event);
        Ok(record)
    }

    pub fn get(&self, record_id: u64) -> Option<&ClockRecord> {
        self.records.get(&record_id)
    }

    /// The open shift for `worker_id`, if any
    pub fn active_record_for(&self, worker_id: &str) -> Option<&ClockRecord> {
        self.records
            .values()
            .find(|r| r.is_active() && r.worker_id == worker_id)
    }

    /// Every record for `worker_id`, newest clock-in first
    pub fn records_for(&self, worker_id: &str) -> Vec<&ClockRecord> {
        newest_first(self.records.values().filter(|r| r.worker_id == worker_id))
    }

    /// Every record, newest clock-in first
    pub fn all_records(&self) -> Vec<&ClockRecord> {
        newest_first(self.records.values())
    }

    /// Open shifts, oldest clock-in first
    pub fn active_records(&self) -> Vec<&ClockRecord> {
        let mut active: Vec<&ClockRecord> =
            self.records.values().filter(|r| r.is_active()).collect();
        active.sort_by_key(|r| (r.clock_in.at_ms, r.id));
        active
    }

    /// Records whose clock-in falls within `[start_ms, end_ms]`, newest first
    pub fn records_between(&self, start_ms: u64, end_ms: u64) -> Vec<&ClockRecord> {
        newest_first(
            self.records
                .values()
                .filter(|r| (start_ms..=end_ms).contains(&r.clock_in.at_ms)),
        )
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

fn newest_first<'a>(records: impl Iterator<Item = &'a ClockRecord>) -> Vec<&'a ClockRecord> {
    let mut records: Vec<&ClockRecord> = records.collect();
    records.sort_by(|a, b| {
        b.clock_in
            .at_ms
            .cmp(&a.clock_in.at_ms)
            .then(b.id.cmp(&a.id))
    });
    records
}
