//! Request and response bodies.
//!
//! Timestamps leave the server as RFC 3339 strings; the core keeps
//! milliseconds since epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiftwatch_core::shift::MILLIS_PER_DAY;
use shiftwatch_core::stats::{DailyActivity, DashboardSummary, WorkerHours};
use shiftwatch_core::{
    ClockAction, ClockError, ClockRecord, GeoPoint, LocationStamp, LocationStatus,
    WorkplaceSettings,
};

use crate::error::AppError;

pub fn to_rfc3339(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}

fn to_millis(time: &DateTime<Utc>) -> u64 {
    u64::try_from(time.timestamp_millis()).unwrap_or(0)
}

/// A device position as sent by the browser. Both halves must be present
/// for the position to count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBody {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PositionBody {
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    /// The position checked the same way a clock-in checks it
    pub fn checked_position(&self) -> Result<GeoPoint, ClockError> {
        let position = self.position().ok_or(ClockError::LocationRequired)?;
        Ok(position.validate()?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInBody {
    #[serde(flatten)]
    pub position: PositionBody,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ClockInBody {
    pub fn into_action(self, at_ms: u64) -> ClockAction {
        ClockAction {
            position: self.position.position(),
            note: self.note,
            address: self.address,
            at_ms,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutBody {
    pub record_id: u64,
    #[serde(flatten)]
    pub details: ClockInBody,
}

/// Optional clock-in time filter, RFC 3339 on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl RangeQuery {
    /// `None` when no filter was given
    pub fn bounds(&self) -> Result<Option<(u64, u64)>, AppError> {
        if self.start.is_none() && self.end.is_none() {
            return Ok(None);
        }
        let start = self.start.as_ref().map(to_millis).unwrap_or(0);
        let end = self.end.as_ref().map(to_millis).unwrap_or(u64::MAX);
        if start > end {
            return Err(AppError::InvalidRange);
        }
        Ok(Some((start, end)))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkplaceView {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub radius_meters: f64,
    pub radius_km: f64,
}

impl From<&WorkplaceSettings> for WorkplaceView {
    fn from(w: &WorkplaceSettings) -> Self {
        WorkplaceView {
            name: w.name.clone(),
            latitude: w.location.latitude,
            longitude: w.location.longitude,
            address: w.address.clone(),
            radius_meters: w.radius_meters,
            radius_km: w.radius_km(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: u64,
    pub worker_id: String,
    pub clock_in_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_note: Option<String>,
    pub clock_in_location: LocationStamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out_location: Option<LocationStamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    pub is_active: bool,
}

impl From<&ClockRecord> for RecordView {
    fn from(r: &ClockRecord) -> Self {
        let clock_out = r.clock_out.as_ref();
        RecordView {
            id: r.id,
            worker_id: r.worker_id.clone(),
            clock_in_time: to_rfc3339(r.clock_in.at_ms),
            clock_out_time: clock_out.map(|e| to_rfc3339(e.at_ms)),
            clock_in_note: r.clock_in.note.clone(),
            clock_out_note: clock_out.and_then(|e| e.note.clone()),
            clock_in_location: r.clock_in.location.clone(),
            clock_out_location: clock_out.map(|e| e.location.clone()),
            duration_minutes: r.duration_minutes,
            is_active: r.is_active(),
        }
    }
}

pub fn record_views<'a>(records: impl IntoIterator<Item = &'a ClockRecord>) -> Vec<RecordView> {
    records.into_iter().map(RecordView::from).collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatusView {
    pub location: LocationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_record: Option<RecordView>,
    pub can_clock_in: bool,
    pub can_clock_out: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyView {
    /// UTC date, `YYYY-MM-DD`
    pub date: String,
    pub clock_ins: u32,
    pub hours: f64,
}

impl From<&DailyActivity> for DailyView {
    fn from(d: &DailyActivity) -> Self {
        let date = d
            .epoch_day
            .checked_mul(MILLIS_PER_DAY)
            .and_then(|ms| i64::try_from(ms).ok())
            .and_then(DateTime::from_timestamp_millis)
            .map(|t| t.date_naive().to_string())
            .unwrap_or_default();
        DailyView {
            date,
            clock_ins: d.clock_ins,
            hours: d.hours,
        }
    }
}

/// Recent-activity row with the note a manager should see
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    #[serde(flatten)]
    pub record: RecordView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&ClockRecord> for ActivityView {
    fn from(r: &ClockRecord) -> Self {
        ActivityView {
            record: RecordView::from(r),
            note: r.display_note().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub daily: Vec<DailyView>,
    pub weekly_hours: Vec<WorkerHours>,
    pub currently_working: Vec<RecordView>,
    pub recent_activity: Vec<ActivityView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        assert_eq!(to_rfc3339(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(to_rfc3339(1_700_000_000_000), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn test_position_needs_both_halves() {
        let half = PositionBody {
            latitude: Some(1.0),
            longitude: None,
        };
        assert_eq!(half.position(), None);

        let full = PositionBody {
            latitude: Some(1.0),
            longitude: Some(2.0),
        };
        assert_eq!(full.position(), Some(GeoPoint::new(1.0, 2.0)));
    }

    #[test]
    fn test_checked_position() {
        assert_eq!(
            PositionBody::default().checked_position(),
            Err(ClockError::LocationRequired)
        );

        let off_the_globe = PositionBody {
            latitude: Some(372.9716),
            longitude: Some(77.5946),
        };
        assert!(matches!(
            off_the_globe.checked_position(),
            Err(ClockError::InvalidLocation(_))
        ));

        let clinic = PositionBody {
            latitude: Some(12.9716),
            longitude: Some(77.5946),
        };
        assert_eq!(
            clinic.checked_position(),
            Ok(GeoPoint::new(12.9716, 77.5946))
        );
    }

    #[test]
    fn test_range_bounds() {
        assert!(RangeQuery::default().bounds().unwrap().is_none());

        let query: RangeQuery = serde_json::from_str(
            r#"{"start":"2023-11-14T00:00:00Z","end":"2023-11-15T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            query.bounds().unwrap(),
            Some((1_699_920_000_000, 1_700_006_400_000))
        );

        let reversed: RangeQuery = serde_json::from_str(
            r#"{"start":"2023-11-15T00:00:00Z","end":"2023-11-14T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(reversed.bounds(), Err(AppError::InvalidRange)));
    }

    #[test]
    fn test_daily_view_date() {
        let view = DailyView::from(&DailyActivity {
            epoch_day: 19_675,
            clock_ins: 3,
            hours: 12.5,
        });
        assert_eq!(view.date, "2023-11-14");
    }
}
