use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable listing with an availability window and a daily price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub location: String,
    pub country_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub images_url: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_day: Decimal,
    pub max_guests: i32,
    #[serde(default)]
    pub recommended: bool,
}

impl Trip {
    pub fn availability(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// A booked date interval against a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub trip_id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    pub guests: i32,
}

impl Reservation {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Reservation request before it has been priced and persisted
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub trip_id: String,
    pub user_id: String,
    #[serde(deserialize_with = "crate::dates::deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "crate::dates::deserialize_date")]
    pub end_date: NaiveDate,
    pub guests: i32,
}

impl NewReservation {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Closed calendar interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole days between start and end; negative when reversed.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// True when `self` lies entirely inside `outer`.
    pub fn is_within(&self, outer: &DateRange) -> bool {
        outer.start <= self.start && outer.end >= self.end
    }

    /// General overlap. Touching ranges (one ends the day the other starts)
    /// do not intersect.
    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// How an existing reservation is compared against a proposed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapRule {
    /// Only flag proposals entirely inside an existing reservation.
    #[default]
    Containment,
    /// Flag any proposal sharing at least one night with an existing reservation.
    Intersection,
}

impl OverlapRule {
    pub fn conflicts(self, existing: &DateRange, proposed: &DateRange) -> bool {
        match self {
            OverlapRule::Containment => proposed.is_within(existing),
            OverlapRule::Intersection => proposed.intersects(existing),
        }
    }
}

/// Trip search filters; absent filters match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSearch {
    pub text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub budget: Option<Decimal>,
}

impl TripSearch {
    pub fn matches(&self, trip: &Trip) -> bool {
        if let Some(text) = self.text.as_deref() {
            let needle = text.to_lowercase();
            let hit = [&trip.name, &trip.location, &trip.country_code]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        // still bookable on or after the requested date
        if let Some(start) = self.start_date {
            if trip.end_date < start {
                return false;
            }
        }

        if let Some(budget) = self.budget {
            if trip.price_per_day > budget {
                return false;
            }
        }

        true
    }
}
