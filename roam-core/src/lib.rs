pub mod dates;
pub mod error;
pub mod pricing;
pub mod repository;
pub mod trip;
pub mod validator;

pub use error::{CoreResult, ReservationError};
pub use pricing::{total_price, Quote};
pub use repository::{RepoResult, ReservationRepository, TripRepository};
pub use trip::{DateRange, NewReservation, OverlapRule, Reservation, Trip, TripSearch};
pub use validator::ReservationValidator;
