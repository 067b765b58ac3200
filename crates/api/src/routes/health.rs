use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracker_db::repositories::ProjectRepo;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Rows in `projects`; absent when the database is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_count: Option<i64>,
}

/// GET /health
///
/// Counting projects doubles as the connectivity probe: it also fails if
/// the migrations have not created the `projects` table.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let project_count = match ProjectRepo::count(&state.pool).await {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not query projects");
            None
        }
    };
    let db_healthy = project_count.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        project_count,
    })
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
