use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roam_core::ReservationError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Reservation(#[from] ReservationError),
    #[error("Invalid query parameter {0}")]
    InvalidQuery(&'static str),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Reservation(err) => match err {
                ReservationError::TripNotFound(_) => StatusCode::NOT_FOUND,
                ReservationError::StartBeforeAvailability { .. }
                | ReservationError::InvalidDateRange { .. }
                | ReservationError::InvalidGuests { .. } => StatusCode::BAD_REQUEST,
                ReservationError::AlreadyReserved(_) => StatusCode::CONFLICT,
                ReservationError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Reservation(err) => err.code(),
            AppError::InvalidQuery(_) => "INVALID_QUERY",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal Server Error: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = Json(json!({
            "error": { "code": self.code() },
        }));

        (status, body).into_response()
    }
}
