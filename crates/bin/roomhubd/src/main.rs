//! # roomhubd: roomhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`roomhub.toml` plus environment overrides)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use roomhub_adapter_http_axum::state::AppState;
use roomhub_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteAmenityRepository, SqliteCategoryRepository,
    SqliteRoomRepository, SqliteUserRepository,
};
use roomhub_app::services::amenity_service::AmenityService;
use roomhub_app::services::category_service::CategoryService;
use roomhub_app::services::room_service::RoomService;
use roomhub_app::services::user_service::UserService;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();
    tracing::info!(url = config.database_url(), "database ready");

    // Services. The room service reads categories, amenities and owners
    // through its own repository handles on the same pool.
    let amenity_service = AmenityService::new(SqliteAmenityRepository::new(pool.clone()));
    let category_service = CategoryService::new(SqliteCategoryRepository::new(pool.clone()));
    let user_service = UserService::new(SqliteUserRepository::new(pool.clone()));
    let room_service = RoomService::new(
        SqliteRoomRepository::new(pool.clone()),
        SqliteCategoryRepository::new(pool.clone()),
        SqliteAmenityRepository::new(pool.clone()),
        SqliteUserRepository::new(pool),
    );

    // HTTP
    let state = AppState::new(amenity_service, category_service, room_service, user_service);
    let app = roomhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("roomhubd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("roomhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
