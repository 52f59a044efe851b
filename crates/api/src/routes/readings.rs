//! Reading Window Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, TimeDelta};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::AppState;
use storage::{StorageError, StoredRecord};

/// Look-back windows offered to dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Hour,
    TwelveHours,
    Day,
    Week,
    Month,
}

impl Window {
    /// Path segment for this window
    pub fn as_str(&self) -> &'static str {
        match self {
            Window::Hour => "1h",
            Window::TwelveHours => "12h",
            Window::Day => "24h",
            Window::Week => "7d",
            Window::Month => "30d",
        }
    }

    /// How far back the window reaches
    pub fn span(&self) -> TimeDelta {
        match self {
            Window::Hour => TimeDelta::hours(1),
            Window::TwelveHours => TimeDelta::hours(12),
            Window::Day => TimeDelta::hours(24),
            Window::Week => TimeDelta::days(7),
            Window::Month => TimeDelta::days(30),
        }
    }
}

impl FromStr for Window {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Window::Hour),
            "12h" => Ok(Window::TwelveHours),
            "24h" => Ok(Window::Day),
            "7d" => Ok(Window::Week),
            "30d" => Ok(Window::Month),
            other => Err(ApiError::UnknownWindow(other.to_string())),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading as served to clients
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
}

impl From<StoredRecord> for ReadingResponse {
    fn from(record: StoredRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            temperature: record.temperature,
            humidity: record.humidity,
        }
    }
}

/// Route-level failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unknown window '{0}', expected one of 1h, 12h, 24h, 7d, 30d")]
    UnknownWindow(String),
    #[error("Query failed")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownWindow(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(err) => {
                error!("Query error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Readings recorded within the requested window, oldest first
pub async fn get_window(
    State(state): State<Arc<AppState>>,
    Path(window): Path<String>,
) -> Result<Json<Vec<ReadingResponse>>, ApiError> {
    let window: Window = window.parse()?;
    let cutoff = Local::now().naive_local() - window.span();

    let records = state.store.readings_since(cutoff).await?;
    info!("{} data served ({} readings)", window, records.len());

    Ok(Json(records.into_iter().map(ReadingResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use storage::ReadingStore;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn seeded_store() -> (ReadingStore, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("api-{}", Uuid::new_v4()));
        let path = dir.join("sensor_data.db");
        let writer = ReadingStore::new(&path);
        writer.initialize().await.unwrap();

        let now = Local::now().naive_local();
        writer
            .append(now - TimeDelta::hours(3), 19.0, 45.0)
            .await
            .unwrap();
        writer
            .append(now - TimeDelta::minutes(30), 22.5, 55.0)
            .await
            .unwrap();

        (ReadingStore::read_only(&path), dir)
    }

    async fn get(store: ReadingStore, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = create_router(Arc::new(AppState::new(store)));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[test]
    fn test_window_parsing() {
        assert_eq!("7d".parse::<Window>().unwrap(), Window::Week);
        assert_eq!(Window::TwelveHours.to_string(), "12h");
        assert!("2h".parse::<Window>().is_err());
    }

    #[tokio::test]
    async fn test_hour_window_returns_recent_only() {
        let (store, dir) = seeded_store().await;
        let (status, body) = get(store, "/api/data/1h").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["temperature"], 22.5);
        assert_eq!(rows[0]["humidity"], 55.0);
        assert!(rows[0]["timestamp"].is_string());
        assert!(rows[0].get("id").is_none());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_day_window_in_insertion_order() {
        let (store, dir) = seeded_store().await;
        let (status, body) = get(store, "/api/data/24h").await;

        assert_eq!(status, StatusCode::OK);
        let temps: Vec<f64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["temperature"].as_f64().unwrap())
            .collect();
        assert_eq!(temps, vec![19.0, 22.5]);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_unknown_window_is_not_found() {
        let (store, dir) = seeded_store().await;
        let (status, body) = get(store, "/api/data/2h").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("2h"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_missing_database_is_server_error() {
        let path = std::env::temp_dir()
            .join(format!("api-missing-{}", Uuid::new_v4()))
            .join("sensor_data.db");
        let (status, body) = get(ReadingStore::read_only(path), "/api/data/1h").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Query failed");
    }

    #[tokio::test]
    async fn test_health_reports_count() {
        let (store, dir) = seeded_store().await;
        let (status, body) = get(store, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stored_readings"], 2);
        let _ = std::fs::remove_dir_all(dir);
    }
}
