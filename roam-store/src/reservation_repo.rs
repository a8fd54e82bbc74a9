use async_trait::async_trait;
use chrono::NaiveDate;
use roam_core::repository::{RepoResult, ReservationRepository};
use roam_core::{DateRange, OverlapRule, Reservation};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// Postgres SQLSTATE for exclusion constraint violations
const EXCLUSION_VIOLATION: &str = "23P01";

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RESERVATION_COLUMNS: &str = "id, trip_id, user_id, start_date, end_date, total_paid, guests";

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    trip_id: String,
    user_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_paid: Decimal,
    guests: i32,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            trip_id: row.trip_id,
            user_id: row.user_id,
            start_date: row.start_date,
            end_date: row.end_date,
            total_paid: row.total_paid,
            guests: row.guests,
        }
    }
}

fn overlap_clause(rule: OverlapRule) -> &'static str {
    match rule {
        OverlapRule::Containment => "start_date <= $2 AND end_date >= $3",
        OverlapRule::Intersection => "start_date < $3 AND end_date > $2",
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn find_conflicting(
        &self,
        trip_id: &str,
        range: &DateRange,
        rule: OverlapRule,
    ) -> RepoResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {} FROM trip_reservations WHERE trip_id = $1 AND {}",
            RESERVATION_COLUMNS,
            overlap_clause(rule)
        ))
        .bind(trip_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn insert_if_available(&self, reservation: &Reservation) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Serializes writers per trip for the rest of the transaction
        let locked: Option<String> = sqlx::query_scalar("SELECT id FROM trips WHERE id = $1 FOR UPDATE")
            .bind(&reservation.trip_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Err(format!("Trip {} disappeared before reservation", reservation.trip_id).into());
        }

        let taken: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM trip_reservations WHERE trip_id = $1 AND {})",
            overlap_clause(OverlapRule::Intersection)
        ))
        .bind(&reservation.trip_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .fetch_one(&mut *tx)
        .await?;

        if taken {
            debug!("Trip {} already has an intersecting reservation", reservation.trip_id);
            return Ok(false);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO trip_reservations (id, trip_id, user_id, start_date, end_date, total_paid, guests)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation.id)
        .bind(&reservation.trip_id)
        .bind(&reservation.user_id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.total_paid)
        .bind(reservation.guests)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) => {
                warn!("Exclusion constraint rejected reservation for trip {}", reservation.trip_id);
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn list_for_user(&self, user_id: &str) -> RepoResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "SELECT {} FROM trip_reservations WHERE user_id = $1 ORDER BY start_date DESC",
            RESERVATION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_clause_binds_start_then_end() {
        assert_eq!(overlap_clause(OverlapRule::Containment), "start_date <= $2 AND end_date >= $3");
        assert_eq!(overlap_clause(OverlapRule::Intersection), "start_date < $3 AND end_date > $2");
    }
}
