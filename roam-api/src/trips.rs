use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use roam_core::dates::{deserialize_date, parse_date};
use roam_core::{Trip, TripSearch};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCheckRequest {
    pub trip_id: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCheckResponse {
    pub success: bool,
    pub trip: Trip,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Raw search query. Clients send the literal string `null` for unset filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub text: Option<String>,
    pub start_date: Option<String>,
    pub budget: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != "null" && *v != "undefined")
}

impl SearchParams {
    fn into_search(self) -> Result<TripSearch, AppError> {
        let text = present(self.text.as_deref()).map(str::to_string);

        let start_date = match present(self.start_date.as_deref()) {
            Some(raw) => Some(parse_date(raw).ok_or(AppError::InvalidQuery("startDate"))?),
            None => None,
        };

        let budget = match present(self.budget.as_deref()) {
            Some(raw) => Some(Decimal::from_str(raw).map_err(|_| AppError::InvalidQuery("budget"))?),
            None => None,
        };

        Ok(TripSearch { text, start_date, budget })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/trips/check", post(check_trip))
        .route("/api/trips/search", get(search_trips))
        .route("/api/trips/{trip_id}", get(get_trip))
}

/// POST /api/trips/check
/// Validate and price a proposed stay without reserving it
pub async fn check_trip(
    State(state): State<AppState>,
    Json(req): Json<TripCheckRequest>,
) -> Result<Json<TripCheckResponse>, AppError> {
    let quote = state
        .validator
        .validate(&req.trip_id, req.start_date, req.end_date)
        .await?;

    info!(
        "Trip {} available {}..{} for {}",
        req.trip_id, req.start_date, req.end_date, quote.total_price
    );

    Ok(Json(TripCheckResponse {
        success: true,
        trip: quote.trip,
        total_price: quote.total_price,
    }))
}

/// GET /api/trips/search?text=&startDate=&budget=
pub async fn search_trips(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Trip>>, AppError> {
    let search = params.into_search()?;
    let trips = state
        .trips
        .search_trips(&search)
        .await
        .map_err(roam_core::ReservationError::from)?;
    Ok(Json(trips))
}

/// GET /api/trips/{trip_id}
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    let trip = state.validator.load_trip(&trip_id).await?;
    Ok(Json(trip))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_filters_are_ignored() {
        let params = SearchParams {
            text: Some("".to_string()),
            start_date: Some("null".to_string()),
            budget: Some("null".to_string()),
        };
        assert_eq!(params.into_search().unwrap(), TripSearch::default());
    }

    #[test]
    fn test_filters_parse() {
        let params = SearchParams {
            text: Some("Paris".to_string()),
            start_date: Some("2024-03-01T03:00:00.000Z".to_string()),
            budget: Some("250.50".to_string()),
        };
        let search = params.into_search().unwrap();
        assert_eq!(search.text.as_deref(), Some("Paris"));
        assert_eq!(search.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(search.budget, Some(Decimal::new(25050, 2)));
    }

    #[test]
    fn test_bad_budget_rejected() {
        let params = SearchParams { budget: Some("cheap".to_string()), ..Default::default() };
        assert!(matches!(params.into_search(), Err(AppError::InvalidQuery("budget"))));
    }
}
