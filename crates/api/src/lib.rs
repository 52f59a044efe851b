//! Room Climate API Server
//!
//! Read-only REST API serving the stored readings, and the host address,
//! to dashboards on the local network.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod routes;

pub use routes::readings::Window;

use storage::ReadingStore;

/// Application state shared across handlers
pub struct AppState {
    /// Read-only view of the readings database
    pub store: ReadingStore,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(store: ReadingStore) -> Self {
        Self {
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub stored_readings: Option<i64>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/get-ip", get(routes::host::get_ip))
        .route("/api/data/:window", get(routes::readings::get_window))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler() -> &'static str {
    "Room climate sensor API is running"
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stored_readings = match state.store.count().await {
        Ok(count) => Some(count),
        Err(err) => {
            warn!("Health check could not count readings: {}", err);
            None
        }
    };

    Json(HealthResponse {
        status: (if stored_readings.is_some() { "healthy" } else { "degraded" }).to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        stored_readings,
    })
}

/// Run the server until the process is terminated
pub async fn run_server(addr: &str, store: ReadingStore) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(store));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
