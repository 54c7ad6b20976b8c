//! # Template Catalog API
//!
//! Access to the standard templates seeded at startup. Templates are never
//! edited through the API; they can only be shown or hidden in listings.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use sas_core::{Template, TemplateSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Build the templates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/templates", get(list_templates))
        .route("/api/templates/:id", get(get_template))
        .route("/api/templates/:id/active", put(set_template_active))
}

/// Request and response body for the listing toggle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemplateActivation {
    /// Whether the template appears in `GET /api/templates`.
    pub active: bool,
}

/// GET /api/templates: Active templates with their item counts.
#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Active template summaries, in catalog order", body = serde_json::Value),
    ),
    tag = "templates"
)]
async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateSummary>>, AppError> {
    let templates = db::templates::list_active(&state.pool).await?;
    Ok(Json(templates.iter().map(Template::summary).collect()))
}

/// GET /api/templates/:id: Full template with dimensions and control items.
#[utoipa::path(
    get,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template ID, e.g. djcp_data")),
    responses(
        (status = 200, description = "Template found", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, AppError> {
    db::templates::get(&state.pool, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::template_not_found(&id))
}

/// PUT /api/templates/:id/active: Show or hide a template in listings.
///
/// Existing tasks keep working against a hidden template.
#[utoipa::path(
    put,
    path = "/api/templates/{id}/active",
    params(("id" = String, Path, description = "Template ID, e.g. djcp_data")),
    request_body = TemplateActivation,
    responses(
        (status = 200, description = "Flag stored", body = TemplateActivation),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
async fn set_template_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TemplateActivation>, JsonRejection>,
) -> Result<Json<TemplateActivation>, AppError> {
    let TemplateActivation { active } = extract_json(body)?;
    if !db::templates::set_active(&state.pool, &id, active).await? {
        return Err(AppError::template_not_found(&id));
    }
    tracing::info!(template_id = %id, active, "template listing flag changed");
    Ok(Json(TemplateActivation { active }))
}
