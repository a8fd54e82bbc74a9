use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreResult, ReservationError};
use crate::pricing::{total_price, Quote};
use crate::repository::{ReservationRepository, TripRepository};
use crate::trip::{DateRange, NewReservation, OverlapRule, Reservation, Trip};

/// Checks proposed stays against a trip's availability and existing
/// reservations, and prices them.
///
/// Holds no mutable state; clones share the same repositories.
#[derive(Clone)]
pub struct ReservationValidator {
    trips: Arc<dyn TripRepository>,
    reservations: Arc<dyn ReservationRepository>,
    check_overlap: OverlapRule,
}

impl ReservationValidator {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        reservations: Arc<dyn ReservationRepository>,
        check_overlap: OverlapRule,
    ) -> Self {
        Self {
            trips,
            reservations,
            check_overlap,
        }
    }

    /// Read-only check-and-price of a proposed stay.
    pub async fn validate(
        &self,
        trip_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> CoreResult<Quote> {
        let range = DateRange::new(start_date, end_date);
        let trip = self.load_trip(trip_id).await?;
        check_dates(&trip, &range)?;

        let conflicts = self
            .reservations
            .find_conflicting(trip_id, &range, self.check_overlap)
            .await?;

        if !conflicts.is_empty() {
            debug!(
                "Trip {} has {} reservation(s) covering {}..{}",
                trip_id,
                conflicts.len(),
                start_date,
                end_date
            );
            return Err(ReservationError::AlreadyReserved(trip_id.to_string()));
        }

        let total_price = total_price(&range, trip.price_per_day);
        Ok(Quote { trip, total_price })
    }

    /// Validates, prices and persists a reservation. The store re-checks for
    /// any intersecting stay inside its own atomic insert, so two racing
    /// requests for the same nights cannot both succeed.
    pub async fn reserve(&self, request: NewReservation) -> CoreResult<Reservation> {
        let range = request.range();
        let trip = self.load_trip(&request.trip_id).await?;
        check_dates(&trip, &range)?;

        if request.guests < 1 || request.guests > trip.max_guests {
            return Err(ReservationError::InvalidGuests {
                requested: request.guests,
                max: trip.max_guests,
            });
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            total_paid: total_price(&range, trip.price_per_day),
            trip_id: request.trip_id,
            user_id: request.user_id,
            start_date: range.start,
            end_date: range.end,
            guests: request.guests,
        };

        if !self.reservations.insert_if_available(&reservation).await? {
            warn!(
                "Reservation rejected, trip {} already booked within {}..{}",
                reservation.trip_id, range.start, range.end
            );
            return Err(ReservationError::AlreadyReserved(reservation.trip_id));
        }

        info!(
            "Reservation {} created for trip {} ({} nights)",
            reservation.id,
            reservation.trip_id,
            range.days()
        );
        Ok(reservation)
    }

    pub async fn load_trip(&self, trip_id: &str) -> CoreResult<Trip> {
        self.trips
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| ReservationError::TripNotFound(trip_id.to_string()))
    }
}

fn check_dates(trip: &Trip, range: &DateRange) -> CoreResult<()> {
    if range.start < trip.start_date {
        return Err(ReservationError::StartBeforeAvailability {
            requested: range.start,
            available_from: trip.start_date,
        });
    }

    if range.end <= range.start {
        return Err(ReservationError::InvalidDateRange {
            start: range.start,
            end: range.end,
        });
    }

    Ok(())
}
