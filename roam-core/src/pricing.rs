use rust_decimal::Decimal;
use serde::Serialize;

use crate::trip::{DateRange, Trip};

/// Priced, conflict-free stay on a trip
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub trip: Trip,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// Nights in the range times the daily price.
pub fn total_price(range: &DateRange, price_per_day: Decimal) -> Decimal {
    Decimal::from(range.days()) * price_per_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_total_price() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        assert_eq!(total_price(&range, Decimal::new(100, 0)), Decimal::new(500, 0));
    }

    #[test]
    fn test_total_price_keeps_cents() {
        // 3 nights at 89.90
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(total_price(&range, Decimal::new(8990, 2)), Decimal::new(26970, 2));
    }
}
