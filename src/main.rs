use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use physioborn::config::AppConfig;
use physioborn::db;
use physioborn::handlers;
use physioborn::models::{AvailabilityIndex, OpeningHours, ServiceCatalog};
use physioborn::services::notify::emailjs::EmailJsProvider;
use physioborn::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.emailjs_public_key.is_empty() || config.emailjs_service_id.is_empty() {
        tracing::warn!("EmailJS credentials not set, confirmation emails will fail");
    }

    let conn = db::init_db(&config.database_url)?;

    let notifier = EmailJsProvider::new(
        config.emailjs_public_key.clone(),
        config.emailjs_service_id.clone(),
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        catalog: ServiceCatalog::default(),
        hours: OpeningHours::default(),
        availability: Mutex::new(AvailabilityIndex::default()),
        notifier: Box::new(notifier),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/services", get(handlers::services::list_services))
        .route(
            "/api/availability",
            get(handlers::availability::get_availability),
        )
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .layer(TraceLayer::new_for_http())
        // The booking page is served from a separate origin.
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
