use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shiftwatch_core::{ClockError, WorkplaceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Workplace(#[from] WorkplaceError),

    #[error("Invalid date range: start is after end")]
    InvalidRange,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Clock(e) => match e {
                ClockError::LocationRequired | ClockError::InvalidLocation(_) => {
                    StatusCode::BAD_REQUEST
                }
                ClockError::NoWorkplace | ClockError::RecordNotFound(_) => StatusCode::NOT_FOUND,
                ClockError::OutsidePerimeter { .. } | ClockError::NotOwner(_) => {
                    StatusCode::FORBIDDEN
                }
                ClockError::AlreadyClockedIn { .. } | ClockError::NotClockedIn(_) => {
                    StatusCode::CONFLICT
                }
            },
            AppError::Workplace(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRange => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!("Request failed with {}: {}", status, self);

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
