use anyhow::Context;
use roam_api::{app, AppState};
use roam_core::{ReservationRepository, TripRepository};
use roam_store::app_config::{Config, StorageBackend};
use roam_store::{DbClient, InMemoryStore, PgReservationRepository, PgTripRepository};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roam_api=debug,roam_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Roam API on port {}", config.server.port);

    let (trips, reservations): (Arc<dyn TripRepository>, Arc<dyn ReservationRepository>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let db = DbClient::new(&config.database)
                    .await
                    .context("Failed to connect to Postgres")?;
                db.migrate().await.context("Failed to run migrations")?;
                let trips: Arc<dyn TripRepository> = Arc::new(PgTripRepository::new(db.pool.clone()));
                let reservations: Arc<dyn ReservationRepository> =
                    Arc::new(PgReservationRepository::new(db.pool.clone()));
                (trips, reservations)
            }
            StorageBackend::Memory => {
                let store = match &config.storage.seed_path {
                    Some(path) => InMemoryStore::from_seed_file(path).context("Failed to load seed data")?,
                    None => InMemoryStore::new(),
                };
                tracing::warn!("Using in-memory storage, reservations are lost on restart");
                let store = Arc::new(store);
                let trips: Arc<dyn TripRepository> = store.clone();
                let reservations: Arc<dyn ReservationRepository> = store;
                (trips, reservations)
            }
        };

    let app_state = AppState::new(trips, reservations, config.business_rules.check_overlap);
    let app = app(app_state, Duration::from_secs(config.server.request_timeout_seconds));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
