use chrono::NaiveDate;

/// Failures of the check-and-price and reservation operations.
///
/// Every variant except `Storage` is a business outcome the caller is expected
/// to show to the user; `code()` gives the stable wire identifier.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Start date {requested} is before trip availability starting {available_from}")]
    StartBeforeAvailability {
        requested: NaiveDate,
        available_from: NaiveDate,
    },

    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Guest count {requested} outside allowed range 1..={max}")]
    InvalidGuests { requested: i32, max: i32 },

    #[error("Trip {0} is already reserved for the requested dates")]
    AlreadyReserved(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

impl ReservationError {
    pub fn code(&self) -> &'static str {
        match self {
            ReservationError::TripNotFound(_) => "TRIP_NOT_FOUND",
            // Historical wire code, clients already match on it.
            ReservationError::StartBeforeAvailability { .. } => "INVALID_END_DATE",
            ReservationError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            ReservationError::InvalidGuests { .. } => "INVALID_GUESTS",
            ReservationError::AlreadyReserved(_) => "TRIP_ALREADY_RESERVED",
            ReservationError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ReservationError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, ReservationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_check_keeps_legacy_code() {
        let err = ReservationError::StartBeforeAvailability {
            requested: NaiveDate::from_ymd_opt(2023, 12, 25).unwrap(),
            available_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(err.code(), "INVALID_END_DATE");
    }

    #[test]
    fn test_storage_error_from_boxed() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "connection reset".into();
        let err = ReservationError::from(boxed);
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(err.to_string().contains("connection reset"));
    }
}
