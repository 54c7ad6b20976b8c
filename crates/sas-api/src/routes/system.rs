//! # System API
//!
//! Service health and task statistics.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Task counts by status.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_tasks: i64,
    pub draft_tasks: i64,
    pub in_progress_tasks: i64,
    pub completed_tasks: i64,
}

/// Build the system router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stats", get(stats))
}

/// GET /api/health: Always `ok` while the process serves requests.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "system"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /api/stats: Task counts overall and per status.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Task statistics", body = StatsResponse),
    ),
    tag = "system"
)]
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let counts = db::tasks::status_counts(&state.pool).await?;
    Ok(Json(StatsResponse {
        total_tasks: counts.total,
        draft_tasks: counts.draft,
        in_progress_tasks: counts.in_progress,
        completed_tasks: counts.completed,
    }))
}
