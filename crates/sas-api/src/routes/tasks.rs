//! # Assessment Task API
//!
//! Task lifecycle: create from a template, inspect, rename, set status,
//! delete, and read the scored result. Status may be set to any value at
//! any time.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sas_core::{scoring, AssessmentResult, TaskStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::db::tasks::TaskChanges;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_non_blank, Validate};
use crate::routes::items::ItemView;
use crate::state::{AppState, TaskRecord};

/// Longest task name accepted, in characters.
pub const MAX_NAME_CHARS: usize = 200;

fn check_name(name: &str) -> Result<(), String> {
    require_non_blank("name", name)?;
    if name.trim().chars().count() > MAX_NAME_CHARS {
        return Err(format!("name must not exceed {MAX_NAME_CHARS} characters"));
    }
    Ok(())
}

/// Trimmed organization, or `None` when blank.
fn normalize_organization(raw: &str) -> Option<String> {
    Some(raw.trim()).filter(|o| !o.is_empty()).map(str::to_string)
}

// ── Request / response types ────────────────────────────────────────────────

/// Request to create an assessment task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub name: String,
    /// Template to assess against, e.g. `djcp_data`.
    pub template_id: String,
    #[serde(default)]
    pub organization: Option<String>,
}

impl Validate for CreateTaskRequest {
    fn validate(&self) -> Result<(), String> {
        check_name(&self.name)?;
        require_non_blank("template_id", &self.template_id)?;
        Ok(())
    }
}

/// Partial task update. Omitted fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// A blank value clears the organization.
    #[serde(default)]
    pub organization: Option<String>,
    /// `draft`, `in_progress` or `completed`.
    #[serde(default)]
    pub status: Option<String>,
}

impl Validate for UpdateTaskRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(status) = &self.status {
            status
                .parse::<TaskStatus>()
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

impl UpdateTaskRequest {
    fn into_changes(self) -> Result<TaskChanges, AppError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        Ok(TaskChanges {
            name: self.name.map(|n| n.trim().to_string()),
            organization: self.organization.as_deref().map(normalize_organization),
            status,
        })
    }
}

/// Response to task creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedTask {
    pub id: i64,
    pub message: String,
}

/// Generic acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// A task with its template name and every item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskDetail {
    pub id: i64,
    pub name: String,
    pub template_id: String,
    /// Template display name; falls back to the template id.
    pub template_name: String,
    pub organization: Option<String>,
    #[schema(value_type = String, example = "in_progress")]
    pub status: TaskStatus,
    pub total_score: f64,
    pub compliance_rate: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub items: Vec<ItemView>,
}

/// Scored result of a task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: i64,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

// ── Router ──────────────────────────────────────────────────────────────────

/// Build the tasks router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/:id/items", get(list_task_items))
        .route("/api/tasks/:id/result", get(get_task_result))
}

async fn require_task(state: &AppState, id: i64) -> Result<TaskRecord, AppError> {
    db::tasks::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::task_not_found(id))
}

// ── Handlers ────────────────────────────────────────────────────────────────

/// GET /api/tasks: All tasks, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Task list", body = Vec<TaskRecord>),
    ),
    tag = "tasks"
)]
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskRecord>>, AppError> {
    Ok(Json(db::tasks::list(&state.pool).await?))
}

/// POST /api/tasks: Create a draft task with one not-started item per control item.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = CreatedTask),
        (status = 404, description = "Unknown template", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedTask>), AppError> {
    let req = extract_validated_json(body)?;
    let template = db::templates::get(&state.pool, &req.template_id)
        .await?
        .ok_or_else(|| AppError::template_not_found(&req.template_id))?;

    let organization = req.organization.as_deref().and_then(normalize_organization);
    let id = db::tasks::insert_with_items(
        &state.pool,
        req.name.trim(),
        organization.as_deref(),
        &template,
    )
    .await?;

    tracing::info!(
        task_id = id,
        template_id = %template.id,
        items = template.items.len(),
        "assessment task created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedTask {
            id,
            message: "assessment task created".to_string(),
        }),
    ))
}

/// GET /api/tasks/:id: Task detail with every item.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskDetail),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskDetail>, AppError> {
    let task = require_task(&state, id).await?;
    let template_name = db::templates::get(&state.pool, &task.template_id)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| task.template_id.clone());
    let items = db::items::list_for_task(&state.pool, id).await?;

    Ok(Json(TaskDetail {
        id: task.id,
        name: task.name,
        template_id: task.template_id,
        template_name,
        organization: task.organization,
        status: task.status,
        total_score: task.total_score,
        compliance_rate: task.compliance_rate,
        created_at: task.created_at,
        updated_at: task.updated_at,
        items: items.into_iter().map(ItemView::from).collect(),
    }))
}

/// PUT /api/tasks/:id: Partial update of name, organization and status.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskRecord),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskRecord>, AppError> {
    let changes = extract_validated_json(body)?.into_changes()?;
    if !db::tasks::update(&state.pool, id, &changes).await? {
        return Err(AppError::task_not_found(id));
    }
    Ok(Json(require_task(&state, id).await?))
}

/// DELETE /api/tasks/:id: Delete a task, its items and its uploads.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !db::tasks::delete(&state.pool, id).await? {
        return Err(AppError::task_not_found(id));
    }

    // Uploads are best-effort: the task is already gone.
    let dir = state.task_upload_dir(id);
    match tokio::fs::remove_dir_all(&dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            task_id = id,
            dir = %dir.display(),
            error = %e,
            "failed to remove task upload directory"
        ),
    }

    tracing::info!(task_id = id, "assessment task deleted");
    Ok(Json(MessageResponse {
        message: "assessment task deleted".to_string(),
    }))
}

/// GET /api/tasks/:id/items: The task's items in template order.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}/items",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Items of the task", body = Vec<ItemView>),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn list_task_items(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ItemView>>, AppError> {
    require_task(&state, id).await?;
    let items = db::items::list_for_task(&state.pool, id).await?;
    Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

/// GET /api/tasks/:id/result: Scored result, computed from the current items.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}/result",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Assessment result", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "tasks"
)]
async fn get_task_result(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskResult>, AppError> {
    let task = require_task(&state, id).await?;
    let template = db::templates::get(&state.pool, &task.template_id)
        .await?
        .ok_or_else(|| AppError::template_not_found(&task.template_id))?;
    let items = db::items::list_for_task(&state.pool, id).await?;

    let scored: Vec<_> = items.iter().map(|i| i.scored()).collect();
    Ok(Json(TaskResult {
        task_id: id,
        result: scoring::evaluate(&template, &scored),
    }))
}
