use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use roam_core::{NewReservation, Reservation, ReservationError};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/trips/reservation", post(create_reservation))
        .route("/api/users/{user_id}/reservations", get(list_user_reservations))
}

/// POST /api/trips/reservation
/// Persist a stay; the conflict check and the insert happen atomically in the store
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<NewReservation>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let reservation = state.validator.reserve(req).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /api/users/{user_id}/reservations
pub async fn list_user_reservations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = state
        .reservations
        .list_for_user(&user_id)
        .await
        .map_err(ReservationError::from)?;
    Ok(Json(reservations))
}
