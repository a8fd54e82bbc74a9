use async_trait::async_trait;
use chrono::NaiveDate;
use roam_core::repository::{RepoResult, TripRepository};
use roam_core::{Trip, TripSearch};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TRIP_COLUMNS: &str = "id, name, location, country_code, description, cover_image, \
    images_url, highlights, start_date, end_date, price_per_day, max_guests, recommended";

#[derive(sqlx::FromRow)]
struct TripRow {
    id: String,
    name: String,
    location: String,
    country_code: String,
    description: String,
    cover_image: String,
    images_url: Vec<String>,
    highlights: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price_per_day: Decimal,
    max_guests: i32,
    recommended: bool,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.id,
            name: row.name,
            location: row.location,
            country_code: row.country_code,
            description: row.description,
            cover_image: row.cover_image,
            images_url: row.images_url,
            highlights: row.highlights,
            start_date: row.start_date,
            end_date: row.end_date,
            price_per_day: row.price_per_day,
            max_guests: row.max_guests,
            recommended: row.recommended,
        }
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn get_trip(&self, id: &str) -> RepoResult<Option<Trip>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM trips WHERE id = $1",
            TRIP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Trip::from))
    }

    async fn search_trips(&self, search: &TripSearch) -> RepoResult<Vec<Trip>> {
        // strpos keeps user text literal, unlike LIKE patterns
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            r#"
            SELECT {} FROM trips
            WHERE ($1::TEXT IS NULL
                   OR strpos(lower(name), lower($1)) > 0
                   OR strpos(lower(location), lower($1)) > 0
                   OR strpos(lower(country_code), lower($1)) > 0)
              AND ($2::DATE IS NULL OR end_date >= $2)
              AND ($3::NUMERIC IS NULL OR price_per_day <= $3)
            ORDER BY name
            "#,
            TRIP_COLUMNS
        ))
        .bind(search.text.as_deref())
        .bind(search.start_date)
        .bind(search.budget)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Trip::from).collect())
    }
}
