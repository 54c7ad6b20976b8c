//! # sas-api: Axum API Service for Standards Self-Assessment
//!
//! HTTP CRUD over SQLite for the assessment workflow: pick a standard
//! template, create a task (which copies the template's control items),
//! rate items, attach evidence, and read the scored result.
//!
//! ## API Surface
//!
//! | Prefix                       | Module                  |
//! |------------------------------|-------------------------|
//! | `/api/templates/*`           | [`routes::templates`]   |
//! | `/api/tasks/*`               | [`routes::tasks`]       |
//! | `/api/tasks/:id/items/:id/*` | [`routes::items`]       |
//! | `/api/health`, `/api/stats`  | [`routes::system`]      |
//! | `/openapi.json`              | [`openapi`]             |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → AuthMiddleware → BodyLimit (JSON) → [BodyLimit (upload)] → Handler
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health checks (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let upload_limit = state.config.max_upload_bytes;

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::templates::router())
        .merge(routes::tasks::router())
        .merge(routes::items::router(upload_limit))
        .merge(routes::system::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(config::MAX_JSON_BYTES))
        .layer(from_fn(auth::auth_middleware))
        .layer(axum::Extension(auth_config));

    // Unauthenticated health checks.
    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: returns 200 once the database answers.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match db::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
