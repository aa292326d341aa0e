use std::sync::Arc;

use chrono::Utc;
use shiftwatch_core::{
    ClockAction, ClockError, ClockRecord, ShiftBook, WorkplaceError, WorkplaceSettings,
    WorkplaceUpdate,
};
use tokio::sync::{RwLock, RwLockReadGuard};

pub type SharedState = Arc<AppState>;

/// Source of "now" in milliseconds since epoch
pub type Clock = fn() -> u64;

pub fn system_now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Server-wide state.
///
/// Lock order is workplace before book. Clock-in holds the book's write lock
/// for the whole check-then-insert, which keeps one open shift per worker.
pub struct AppState {
    workplace: RwLock<Option<WorkplaceSettings>>,
    book: RwLock<ShiftBook>,
    clock: Clock,
}

impl AppState {
    pub fn new(workplace: Option<WorkplaceSettings>) -> SharedState {
        AppState::with_clock(workplace, system_now_ms)
    }

    pub fn with_clock(workplace: Option<WorkplaceSettings>, clock: Clock) -> SharedState {
        Arc::new(AppState {
            workplace: RwLock::new(workplace),
            book: RwLock::new(ShiftBook::new()),
            clock,
        })
    }

    pub fn now_ms(&self) -> u64 {
        (self.clock)()
    }

    pub async fn workplace(&self) -> Option<WorkplaceSettings> {
        self.workplace.read().await.clone()
    }

    /// Apply an editor update, replacing the active workplace
    pub async fn update_workplace(
        &self,
        update: WorkplaceUpdate,
    ) -> Result<WorkplaceSettings, WorkplaceError> {
        let mut workplace = self.workplace.write().await;
        let settings = WorkplaceSettings::from_update(workplace.as_ref(), update)?;

        log::info!(
            "Workplace set to '{}' at {} with {} m perimeter",
            settings.name,
            settings.location,
            settings.radius_meters
        );
        *workplace = Some(settings.clone());
        Ok(settings)
    }

    pub async fn book(&self) -> RwLockReadGuard<'_, ShiftBook> {
        self.book.read().await
    }

    pub async fn clock_in(
        &self,
        worker_id: &str,
        action: ClockAction,
    ) -> Result<ClockRecord, ClockError> {
        let workplace = self.workplace.read().await;
        let mut book = self.book.write().await;

        match book.clock_in(worker_id, workplace.as_ref(), action) {
            Ok(record) => {
                log::info!(
                    "{}: clocked in (record {}) at {}",
                    worker_id,
                    record.id,
                    record.clock_in.location.address
                );
                Ok(record.clone())
            }
            Err(e) => {
                log::warn!("{}: clock-in rejected: {}", worker_id, e);
                Err(e)
            }
        }
    }

    pub async fn clock_out(
        &self,
        worker_id: &str,
        record_id: u64,
        action: ClockAction,
    ) -> Result<ClockRecord, ClockError> {
        let mut book = self.book.write().await;

        match book.clock_out(worker_id, record_id, action) {
            Ok(record) => {
                log::info!(
                    "{}: clocked out (record {}) after {} minutes",
                    worker_id,
                    record.id,
                    record.duration_minutes.unwrap_or(0)
                );
                Ok(record.clone())
            }
            Err(e) => {
                log::warn!("{}: clock-out rejected: {}", worker_id, e);
                Err(e)
            }
        }
    }
}
