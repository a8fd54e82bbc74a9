use async_trait::async_trait;

use crate::trip::{DateRange, OverlapRule, Reservation, Trip, TripSearch};

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Read access to the trip catalog
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn get_trip(&self, id: &str) -> RepoResult<Option<Trip>>;

    async fn search_trips(&self, search: &TripSearch) -> RepoResult<Vec<Trip>>;
}

/// Reservation storage
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Reservations of `trip_id` that conflict with `range` under `rule`.
    async fn find_conflicting(
        &self,
        trip_id: &str,
        range: &DateRange,
        rule: OverlapRule,
    ) -> RepoResult<Vec<Reservation>>;

    /// Persists `reservation` unless it intersects an existing one for the
    /// same trip. The check and the insert must be atomic with respect to
    /// other calls; returns `false` on conflict.
    async fn insert_if_available(&self, reservation: &Reservation) -> RepoResult<bool>;

    /// Newest stay first.
    async fn list_for_user(&self, user_id: &str) -> RepoResult<Vec<Reservation>>;
}
