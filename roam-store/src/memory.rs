use async_trait::async_trait;
use roam_core::repository::{RepoResult, ReservationRepository, TripRepository};
use roam_core::{DateRange, OverlapRule, Reservation, Trip, TripSearch};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

use crate::StoreError;

/// In-process trip and reservation store.
///
/// Backs the `memory` storage backend and the test suites. A single write
/// lock covers the conflict check and the insert of a reservation.
#[derive(Default)]
pub struct InMemoryStore {
    trips: RwLock<HashMap<String, Trip>>,
    reservations: RwLock<Vec<Reservation>>,
}

#[derive(Debug, Deserialize)]
struct Seed {
    #[serde(default)]
    trips: Vec<Trip>,
    #[serde(default)]
    reservations: Vec<Reservation>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(trips: Vec<Trip>, reservations: Vec<Reservation>) -> Self {
        Self {
            trips: RwLock::new(trips.into_iter().map(|t| (t.id.clone(), t)).collect()),
            reservations: RwLock::new(reservations),
        }
    }

    /// Parses `{"trips": [...], "reservations": [...]}`.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let seed: Seed = serde_json::from_str(raw)?;
        Ok(Self::with_data(seed.trips, seed.reservations))
    }

    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json(&raw)?;
        info!("Loaded seed data from {}", path.as_ref().display());
        Ok(store)
    }

    pub async fn add_trip(&self, trip: Trip) {
        self.trips.write().await.insert(trip.id.clone(), trip);
    }

    /// Stores a reservation without any conflict check.
    pub async fn add_reservation(&self, reservation: Reservation) {
        self.reservations.write().await.push(reservation);
    }
}

#[async_trait]
impl TripRepository for InMemoryStore {
    async fn get_trip(&self, id: &str) -> RepoResult<Option<Trip>> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn search_trips(&self, search: &TripSearch) -> RepoResult<Vec<Trip>> {
        let trips = self.trips.read().await;
        let mut found: Vec<Trip> = trips.values().filter(|t| search.matches(t)).cloned().collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn find_conflicting(
        &self,
        trip_id: &str,
        range: &DateRange,
        rule: OverlapRule,
    ) -> RepoResult<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations
            .iter()
            .filter(|r| r.trip_id == trip_id && rule.conflicts(&r.range(), range))
            .cloned()
            .collect())
    }

    async fn insert_if_available(&self, reservation: &Reservation) -> RepoResult<bool> {
        let mut reservations = self.reservations.write().await;
        let taken = reservations.iter().any(|r| {
            r.trip_id == reservation.trip_id
                && OverlapRule::Intersection.conflicts(&r.range(), &reservation.range())
        });
        if taken {
            return Ok(false);
        }
        reservations.push(reservation.clone());
        Ok(true)
    }

    async fn list_for_user(&self, user_id: &str) -> RepoResult<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut mine: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(mine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roam_core::{NewReservation, ReservationValidator};
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use uuid::Uuid;

    const SEED: &str = r#"{
        "trips": [{
            "id": "t1",
            "name": "Casa na Praia",
            "location": "Florianópolis, Brasil",
            "countryCode": "BR",
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "pricePerDay": 100,
            "maxGuests": 4
        }],
        "reservations": [{
            "id": "5f0c7a4e-8f57-4e55-9a3f-8a1d8d7f1b11",
            "tripId": "t1",
            "userId": "u1",
            "startDate": "2024-01-05",
            "endDate": "2024-01-20",
            "totalPaid": 1500,
            "guests": 2
        }]
    }"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(user: &str, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            trip_id: "t1".to_string(),
            user_id: user.to_string(),
            start_date: start,
            end_date: end,
            total_paid: Decimal::ZERO,
            guests: 1,
        }
    }

    #[tokio::test]
    async fn test_seed_loading() {
        let store = InMemoryStore::from_json(SEED).unwrap();
        let trip = store.get_trip("t1").await.unwrap().unwrap();
        assert_eq!(trip.price_per_day, Decimal::new(100, 0));
        assert!(trip.images_url.is_empty());

        let mine = store.list_for_user("u1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].total_paid, Decimal::new(1500, 0));
    }

    #[tokio::test]
    async fn test_seed_rejects_malformed_json() {
        assert!(matches!(InMemoryStore::from_json("{\"trips\": 3}"), Err(StoreError::Seed(_))));
    }

    #[tokio::test]
    async fn test_find_conflicting_by_rule() {
        let store = InMemoryStore::from_json(SEED).unwrap();
        let partial = DateRange::new(date(2024, 1, 1), date(2024, 1, 6));

        let contained = store
            .find_conflicting("t1", &partial, OverlapRule::Containment)
            .await
            .unwrap();
        assert!(contained.is_empty());

        let intersecting = store
            .find_conflicting("t1", &partial, OverlapRule::Intersection)
            .await
            .unwrap();
        assert_eq!(intersecting.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_if_available() {
        let store = InMemoryStore::from_json(SEED).unwrap();

        let overlapping = reservation("u2", date(2024, 1, 18), date(2024, 1, 22));
        assert!(!store.insert_if_available(&overlapping).await.unwrap());

        let back_to_back = reservation("u2", date(2024, 1, 20), date(2024, 1, 22));
        assert!(store.insert_if_available(&back_to_back).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let store = InMemoryStore::new();
        store.add_reservation(reservation("u1", date(2024, 1, 2), date(2024, 1, 3))).await;
        store.add_reservation(reservation("u1", date(2024, 3, 2), date(2024, 3, 3))).await;
        store.add_reservation(reservation("u2", date(2024, 2, 2), date(2024, 2, 3))).await;

        let mine = store.list_for_user("u1").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].start_date, date(2024, 3, 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reservations_single_winner() {
        let store = Arc::new(InMemoryStore::from_json(SEED).unwrap());
        let validator = ReservationValidator::new(store.clone(), store.clone(), OverlapRule::Containment);

        let mut handles = Vec::new();
        for i in 0..8 {
            let validator = validator.clone();
            handles.push(tokio::spawn(async move {
                validator
                    .reserve(NewReservation {
                        trip_id: "t1".to_string(),
                        user_id: format!("user-{}", i),
                        start_date: date(2024, 1, 22),
                        end_date: date(2024, 1, 25),
                        guests: 2,
                    })
                    .await
            }));
        }

        let mut won = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => won += 1,
                Err(e) => assert_eq!(e.code(), "TRIP_ALREADY_RESERVED"),
            }
        }
        assert_eq!(won, 1);
    }
}
