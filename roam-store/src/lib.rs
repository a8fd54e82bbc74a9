pub mod app_config;
pub mod database;
pub mod memory;
pub mod reservation_repo;
pub mod trip_repo;

pub use database::DbClient;
pub use memory::InMemoryStore;
pub use reservation_repo::PgReservationRepository;
pub use trip_repo::PgTripRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),
}
