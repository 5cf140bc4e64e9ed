//! Service info and health endpoints.
//!
//! - `/` - Static service description
//! - `/health` - Store and cache reachability (always 200)

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    service::{ComponentStatus, HealthReport},
    state::AppState,
};

/// Response body for `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub services: [&'static str; 3],
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub postgres: ComponentStatus,
    pub redis: ComponentStatus,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: "healthy",
            postgres: report.store,
            redis: report.cache,
        }
    }
}

/// GET / - Describes the service and its backing components.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Docker Compose Demo - Task Manager",
        services: ["API", "PostgreSQL", "Redis"],
    })
}

/// GET /health - Pings the store and the cache.
///
/// The process itself is healthy whenever it can answer, so this never
/// fails; unreachable backends show up as `disconnected`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = state.tasks.health().await;
    if report.store == ComponentStatus::Disconnected || report.cache == ComponentStatus::Disconnected
    {
        tracing::warn!(store = ?report.store, cache = ?report.cache, "Degraded backends");
    }
    Json(report.into())
}
