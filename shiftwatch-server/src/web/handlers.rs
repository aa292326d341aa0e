use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shiftwatch_core::shift::MILLIS_PER_DAY;
use shiftwatch_core::stats::{daily_activity, hours_by_worker, DASHBOARD_DAYS};
use shiftwatch_core::{
    ClockError, ClockRecord, ClockStats, DashboardSummary, LocationStatus, WorkplaceUpdate,
};

use super::views::{
    record_views, ActivityView, ClockInBody, ClockOutBody, DailyView, DashboardView,
    PositionBody, RangeQuery, RecordView, WorkerStatusView, WorkplaceView,
};
use crate::error::AppError;
use crate::state::SharedState;

/// Rows in the dashboard's recent activity table
const RECENT_ACTIVITY_ROWS: usize = 10;

type ApiResult<T> = Result<Json<T>, AppError>;

fn in_range<'a>(
    records: Vec<&'a ClockRecord>,
    range: &RangeQuery,
) -> Result<Vec<&'a ClockRecord>, AppError> {
    Ok(match range.bounds()? {
        Some((start, end)) => records
            .into_iter()
            .filter(|r| (start..=end).contains(&r.clock_in.at_ms))
            .collect(),
        None => records,
    })
}

pub async fn get_workplace(State(state): State<SharedState>) -> ApiResult<WorkplaceView> {
    let workplace = state.workplace().await.ok_or(ClockError::NoWorkplace)?;
    Ok(Json(WorkplaceView::from(&workplace)))
}

pub async fn put_workplace(
    State(state): State<SharedState>,
    Json(update): Json<WorkplaceUpdate>,
) -> ApiResult<WorkplaceView> {
    let workplace = state.update_workplace(update).await?;
    Ok(Json(WorkplaceView::from(&workplace)))
}

pub async fn workplace_distance(
    State(state): State<SharedState>,
    Json(body): Json<PositionBody>,
) -> ApiResult<LocationStatus> {
    let position = body.checked_position()?;
    let workplace = state.workplace().await.ok_or(ClockError::NoWorkplace)?;
    Ok(Json(LocationStatus::evaluate(position, &workplace)))
}

pub async fn worker_status(
    State(state): State<SharedState>,
    Path(worker): Path<String>,
    Json(body): Json<PositionBody>,
) -> ApiResult<WorkerStatusView> {
    let position = body.checked_position()?;
    let workplace = state.workplace().await.ok_or(ClockError::NoWorkplace)?;
    let location = LocationStatus::evaluate(position, &workplace);

    let book = state.book().await;
    let active_record = book.active_record_for(&worker).map(RecordView::from);
    log::trace!(
        "{}: {} from workplace, active record {:?}",
        worker,
        location.distance_display,
        active_record.as_ref().map(|r| r.id)
    );

    Ok(Json(WorkerStatusView {
        can_clock_in: location.within_perimeter && active_record.is_none(),
        can_clock_out: active_record.is_some(),
        location,
        active_record,
    }))
}

pub async fn clock_in(
    State(state): State<SharedState>,
    Path(worker): Path<String>,
    Json(body): Json<ClockInBody>,
) -> Result<(StatusCode, Json<RecordView>), AppError> {
    let action = body.into_action(state.now_ms());
    let record = state.clock_in(&worker, action).await?;
    Ok((StatusCode::CREATED, Json(RecordView::from(&record))))
}

pub async fn clock_out(
    State(state): State<SharedState>,
    Path(worker): Path<String>,
    Json(body): Json<ClockOutBody>,
) -> ApiResult<RecordView> {
    let action = body.details.into_action(state.now_ms());
    let record = state.clock_out(&worker, body.record_id, action).await?;
    Ok(Json(RecordView::from(&record)))
}

pub async fn worker_records(
    State(state): State<SharedState>,
    Path(worker): Path<String>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Vec<RecordView>> {
    let book = state.book().await;
    let records = in_range(book.records_for(&worker), &range)?;
    Ok(Json(record_views(records)))
}

pub async fn worker_stats(
    State(state): State<SharedState>,
    Path(worker): Path<String>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<ClockStats> {
    let book = state.book().await;
    let records = in_range(book.records_for(&worker), &range)?;
    Ok(Json(ClockStats::from_records(&records)))
}

pub async fn all_records(
    State(state): State<SharedState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Vec<RecordView>> {
    let book = state.book().await;
    let records = in_range(book.all_records(), &range)?;
    Ok(Json(record_views(records)))
}

pub async fn active_records(State(state): State<SharedState>) -> ApiResult<Vec<RecordView>> {
    let book = state.book().await;
    Ok(Json(record_views(book.active_records())))
}

pub async fn all_stats(
    State(state): State<SharedState>,
    Query(range): Query<RangeQuery>,
) -> ApiResult<ClockStats> {
    let book = state.book().await;
    let records = in_range(book.all_records(), &range)?;
    Ok(Json(ClockStats::from_records(&records)))
}

pub async fn dashboard(State(state): State<SharedState>) -> ApiResult<DashboardView> {
    let now_ms = state.now_ms();
    let book = state.book().await;
    let records = book.all_records();

    let week_start = (now_ms / MILLIS_PER_DAY)
        .saturating_sub(u64::from(DASHBOARD_DAYS) - 1)
        * MILLIS_PER_DAY;

    Ok(Json(DashboardView {
        summary: DashboardSummary::compute(&records, now_ms),
        daily: daily_activity(&records, now_ms, DASHBOARD_DAYS)
            .iter()
            .map(DailyView::from)
            .collect(),
        weekly_hours: hours_by_worker(&records, week_start),
        currently_working: record_views(book.active_records()),
        recent_activity: records
            .iter()
            .take(RECENT_ACTIVITY_ROWS)
            .map(|r| ActivityView::from(*r))
            .collect(),
    }))
}
