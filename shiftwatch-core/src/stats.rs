//! Attendance Statistics
//!
//! Aggregates over clock records for the worker history page and the
//! manager dashboard. All functions take the records to aggregate plus, where
//! "today" matters, the current time; nothing here reads a clock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shift::{ClockRecord, MILLIS_PER_DAY};

/// Days covered by the dashboard's weekly figures, today included
pub const DASHBOARD_DAYS: u32 = 7;

/// Totals over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockStats {
    pub total_hours: f64,
    pub completed_shifts: u32,
    pub average_shift_hours: f64,
    pub active_shifts: u32,
}

impl ClockStats {
    /// Hours come from the whole-minute durations recorded at clock-out
    pub fn from_records(records: &[&ClockRecord]) -> Self {
        let completed_shifts = records.iter().filter(|r| !r.is_active()).count() as u32;
        let active_shifts = records.len() as u32 - completed_shifts;
        let total_minutes: u64 = records
            .iter()
            .filter_map(|r| r.duration_minutes)
            .map(u64::from)
            .sum();
        let total_hours = total_minutes as f64 / 60.0;
        let average_shift_hours = if completed_shifts > 0 {
            total_hours / completed_shifts as f64
        } else {
            0.0
        };

        ClockStats {
            total_hours,
            completed_shifts,
            average_shift_hours,
            active_shifts,
        }
    }
}

/// Headline numbers for the manager dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Workers with an open shift right now
    pub currently_working: u32,

    /// Mean length of shifts completed this week, in hours
    pub average_shift_hours: f64,

    /// Clock-ins since midnight UTC
    pub todays_clock_ins: u32,

    /// Hours worked in shifts started this week
    pub total_hours: f64,
}

impl DashboardSummary {
    pub fn compute(records: &[&ClockRecord], now_ms: u64) -> Self {
        let today = now_ms / MILLIS_PER_DAY;
        let week_start = today.saturating_sub(u64::from(DASHBOARD_DAYS) - 1);

        let currently_working = records.iter().filter(|r| r.is_active()).count() as u32;
        let todays_clock_ins = records
            .iter()
            .filter(|r| r.clock_in_day() == today)
            .count() as u32;

        let week: Vec<f64> = records
            .iter()
            .filter(|r| r.clock_in_day() >= week_start)
            .filter_map(|r| r.worked_hours())
            .collect();
        let total_hours: f64 = week.iter().sum();
        let average_shift_hours = if week.is_empty() {
            0.0
        } else {
            total_hours / week.len() as f64
        };

        DashboardSummary {
            currently_working,
            average_shift_hours: round_tenth(average_shift_hours),
            todays_clock_ins,
            total_hours: round_tenth(total_hours),
        }
    }
}

/// Clock-ins and hours for one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// Days since the Unix epoch
    pub epoch_day: u64,
    pub clock_ins: u32,
    /// Hours of completed shifts started that day, to one decimal
    pub hours: f64,
}

/// One entry per day for the `days` days ending today, oldest first.
/// Days with no activity are included with zero counts.
pub fn daily_activity(records: &[&ClockRecord], now_ms: u64, days: u32) -> Vec<DailyActivity> {
    let today = now_ms / MILLIS_PER_DAY;

    (0..u64::from(days))
        .rev()
        .filter_map(|back| today.checked_sub(back))
        .map(|epoch_day| {
            let day_records = records.iter().filter(|r| r.clock_in_day() == epoch_day);
            let mut clock_ins = 0;
            let mut hours = 0.0;
            for record in day_records {
                clock_ins += 1;
                hours += record.worked_hours().unwrap_or(0.0);
            }
            DailyActivity {
                epoch_day,
                clock_ins,
                hours: round_tenth(hours),
            }
        })
        .collect()
}

/// Hours a single worker put in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerHours {
    pub worker_id: String,
    pub hours: f64,
    pub shifts: u32,
}

/// Completed hours per worker for shifts started at or after `since_ms`,
/// most hours first.
pub fn hours_by_worker(records: &[&ClockRecord], since_ms: u64) -> Vec<WorkerHours> {
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.clock_in.at_ms >= since_ms) {
        if let Some(hours) = record.worked_hours() {
            let entry = totals.entry(record.worker_id.as_str()).or_insert((0.0, 0));
            entry.0 += hours;
            entry.1 += 1;
        }
    }

    let mut workers: Vec<WorkerHours> = totals
        .into_iter()
        .map(|(worker_id, (hours, shifts))| WorkerHours {
            worker_id: worker_id.to_string(),
            hours: round_tenth(hours),
            shifts,
        })
        .collect();
    // BTreeMap order breaks ties by worker id since the sort is stable
    workers.sort_by(|a, b| b.hours.total_cmp(&a.hours));
    workers
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
