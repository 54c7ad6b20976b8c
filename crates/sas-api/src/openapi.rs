//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Static bearer token. Enforced only when AUTH_TOKEN is set.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Standards Self-Assessment API",
        version = "0.3.0",
        description = "Compliance self-assessment against national cybersecurity and data-security standards.\n\nPick a template, create a task, rate each control item, attach evidence, and read per-dimension and overall scores.\n\nHealth checks (`/health/*`) are unauthenticated.",
        license(name = "BUSL-1.1")
    ),
    servers(
        (url = "http://localhost:8001", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        // ── Templates ───────────────────────────────────────────────────
        crate::routes::templates::list_templates,
        crate::routes::templates::get_template,
        crate::routes::templates::set_template_active,
        // ── Tasks ───────────────────────────────────────────────────────
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::create_task,
        crate::routes::tasks::get_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::delete_task,
        crate::routes::tasks::list_task_items,
        crate::routes::tasks::get_task_result,
        // ── Items ───────────────────────────────────────────────────────
        crate::routes::items::update_item,
        crate::routes::items::upload_evidence,
        // ── System ──────────────────────────────────────────────────────
        crate::routes::system::health,
        crate::routes::system::stats,
    ),
    components(
        schemas(
            // ── Records ─────────────────────────────────────────────────
            crate::state::TaskRecord,
            crate::state::ItemRecord,
            // ── Error types ─────────────────────────────────────────────
            crate::error::ErrorBody,
            crate::error::ErrorDetail,
            // ── Template DTOs ───────────────────────────────────────────
            crate::routes::templates::TemplateActivation,
            // ── Task DTOs ───────────────────────────────────────────────
            crate::routes::tasks::CreateTaskRequest,
            crate::routes::tasks::UpdateTaskRequest,
            crate::routes::tasks::CreatedTask,
            crate::routes::tasks::MessageResponse,
            crate::routes::tasks::TaskDetail,
            // ── Item DTOs ───────────────────────────────────────────────
            crate::routes::items::ItemView,
            crate::routes::items::UpdateItemRequest,
            crate::routes::items::RatedItem,
            crate::routes::items::EvidenceUpload,
            crate::routes::items::UploadResponse,
            // ── System DTOs ─────────────────────────────────────────────
            crate::routes::system::HealthResponse,
            crate::routes::system::StatsResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "templates", description = "Standard templates: dimensions and control items"),
        (name = "tasks", description = "Assessment tasks, their items, and scored results"),
        (name = "items", description = "Item rating and evidence upload"),
        (name = "system", description = "Health and statistics"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
