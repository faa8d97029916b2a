//! HTTP surface: the date-range weather endpoint and read-only views of the dashboard state.

pub mod config;
pub mod error;
mod weather_range;

use crate::dashboard::snapshot::{DashboardSnapshot, DashboardState};
use crate::export::csv_export::suggested_filename;
use crate::server::config::ProxyConfig;
use crate::server::error::ApiError;
use crate::sources::DailySource;
use crate::types::daily_record::DailyRecord;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

const LOADING_MESSAGE: &str = "Weather data is still loading";

#[derive(Clone)]
pub struct AppState {
    /// Latest published dashboard state, usually [`crate::RefreshScheduler::subscribe`].
    pub dashboard: watch::Receiver<DashboardState>,
    /// Backs `/api/weather`; the endpoint answers 503 without one.
    pub daily: Option<Arc<dyn DailySource>>,
    pub proxy: ProxyConfig,
}

impl AppState {
    fn snapshot(&self) -> Result<Arc<DashboardSnapshot>, ApiError> {
        self.dashboard
            .borrow()
            .snapshot()
            .cloned()
            .ok_or_else(|| ApiError::unavailable(LOADING_MESSAGE))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/weather", get(weather_range::weather_range))
        .route("/api/dashboard", get(dashboard))
        .route("/api/dashboard/export.csv", get(export_csv))
        .route("/api/dashboard/daily", get(daily))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    dashboard: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let dashboard = match &*state.dashboard.borrow() {
        DashboardState::Loading => "loading",
        DashboardState::Ready { .. } => "ready",
        DashboardState::Error { .. } => "error",
    };
    Json(HealthResponse {
        status: "ok",
        service: "weather-analytics",
        dashboard,
    })
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardState> {
    let current = state.dashboard.borrow().clone();
    Json(current)
}

async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = state.snapshot()?.to_csv()?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        suggested_filename(Utc::now())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

async fn daily(State(state): State<AppState>) -> Result<Json<Vec<DailyRecord>>, ApiError> {
    Ok(Json(state.snapshot()?.daily()?))
}
