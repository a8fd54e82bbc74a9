use std::sync::Arc;
use roam_core::{OverlapRule, ReservationRepository, ReservationValidator, TripRepository};

#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<dyn TripRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub validator: ReservationValidator,
}

impl AppState {
    pub fn new(
        trips: Arc<dyn TripRepository>,
        reservations: Arc<dyn ReservationRepository>,
        check_overlap: OverlapRule,
    ) -> Self {
        let validator = ReservationValidator::new(trips.clone(), reservations.clone(), check_overlap);
        Self {
            trips,
            reservations,
            validator,
        }
    }
}
