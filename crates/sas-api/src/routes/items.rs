//! # Assessment Item API
//!
//! Rating an item recomputes its score and the owning task's cached
//! aggregates in one transaction. Evidence files are stored on disk under
//! the task's upload directory.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use sas_core::{scoring, Rating};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::db::items::RatingUpdate;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, ItemRecord};

/// Multipart field carrying the evidence file.
pub const UPLOAD_FIELD: &str = "file";

/// Longest stored file name, in bytes (one path component on common filesystems).
pub const MAX_FILENAME_BYTES: usize = 255;

/// Extensions longer than this are treated as part of the stem when truncating.
const MAX_EXTENSION_BYTES: usize = 16;

// ── Request / response types ────────────────────────────────────────────────

/// An item as returned to clients, with the display label of its rating.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub id: i64,
    pub template_item_id: String,
    pub dimension: String,
    pub control_item: String,
    pub level: String,
    #[schema(value_type = String, example = "partial")]
    pub rating: Rating,
    /// Display label of the rating, e.g. 部分符合.
    pub rating_label: String,
    pub score: f64,
    pub max_score: f64,
    pub evidence: Option<String>,
    pub remarks: Option<String>,
    pub has_attachment: bool,
}

impl From<ItemRecord> for ItemView {
    fn from(item: ItemRecord) -> Self {
        Self {
            rating_label: item.rating.label().to_string(),
            id: item.id,
            template_item_id: item.template_item_id,
            dimension: item.dimension,
            control_item: item.control_item,
            level: item.level,
            rating: item.rating,
            score: item.score,
            max_score: item.max_score,
            evidence: item.evidence,
            remarks: item.remarks,
            has_attachment: item.has_attachment,
        }
    }
}

/// Request to rate an item.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    /// `compliant`, `partial`, `non_compliant`, `not_applicable` or `not_started`.
    pub rating: String,
    /// Replaces the stored evidence when present.
    #[serde(default)]
    pub evidence: Option<String>,
    /// Replaces the stored remarks when present.
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Validate for UpdateItemRequest {
    fn validate(&self) -> Result<(), String> {
        self.rating
            .parse::<Rating>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// The rated item and the task aggregates it produced.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatedItem {
    pub item: ItemView,
    pub task_total_score: f64,
    pub task_compliance_rate: f64,
}

/// Multipart form accepted by the upload route.
#[derive(Debug, ToSchema)]
pub struct EvidenceUpload {
    /// The evidence file. Its client file name is kept after sanitization.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Response to an evidence upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Stored file name, after sanitization.
    pub filename: String,
    pub size: u64,
}

// ── Router ──────────────────────────────────────────────────────────────────

/// Build the items router. Only the upload route accepts bodies up to
/// `max_upload_bytes`.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/api/tasks/:task_id/items/:item_id", put(update_item))
        .route(
            "/api/tasks/:task_id/items/:item_id/upload",
            post(upload_evidence).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

// ── Handlers ────────────────────────────────────────────────────────────────

/// PUT /api/tasks/:task_id/items/:item_id: Rate an item and refresh task aggregates.
#[utoipa::path(
    put,
    path = "/api/tasks/{task_id}/items/{item_id}",
    params(
        ("task_id" = i64, Path, description = "Task ID"),
        ("item_id" = i64, Path, description = "Item ID"),
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item rated", body = RatedItem),
        (status = 404, description = "Item not in task", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown rating", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
async fn update_item(
    State(state): State<AppState>,
    Path((task_id, item_id)): Path<(i64, i64)>,
    body: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<RatedItem>, AppError> {
    let req = extract_validated_json(body)?;
    let rating: Rating = req.rating.parse()?;

    let item = db::items::get(&state.pool, task_id, item_id)
        .await?
        .ok_or_else(|| AppError::item_not_found(task_id, item_id))?;

    let update = RatingUpdate {
        rating,
        score: scoring::item_score(rating, item.max_score),
        evidence: req.evidence.as_deref(),
        remarks: req.remarks.as_deref(),
    };

    let mut tx = state.pool.begin().await?;
    db::items::update_rating(&mut *tx, task_id, item_id, &update).await?;
    let items = db::items::list_for_task(&mut *tx, task_id).await?;
    let scored: Vec<_> = items.iter().map(|i| i.scored()).collect();
    let total = scoring::total_score(&scored);
    let rate = scoring::compliance_rate(&scored);
    db::tasks::update_aggregates(&mut *tx, task_id, total, rate).await?;
    tx.commit().await?;

    let item = items
        .into_iter()
        .find(|i| i.id == item_id)
        .ok_or_else(|| AppError::item_not_found(task_id, item_id))?;

    tracing::debug!(task_id, item_id, rating = %rating, total, rate, "item rated");

    Ok(Json(RatedItem {
        item: ItemView::from(item),
        task_total_score: total,
        task_compliance_rate: rate,
    }))
}

/// POST /api/tasks/:task_id/items/:item_id/upload: Attach an evidence file.
#[utoipa::path(
    post,
    path = "/api/tasks/{task_id}/items/{item_id}/upload",
    params(
        ("task_id" = i64, Path, description = "Task ID"),
        ("item_id" = i64, Path, description = "Item ID"),
    ),
    request_body(
        content = EvidenceUpload,
        content_type = "multipart/form-data",
        description = "Form with a `file` field"
    ),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing or unusable file", body = crate::error::ErrorBody),
        (status = 404, description = "Task or item not found", body = crate::error::ErrorBody),
        (status = 413, description = "File too large", body = crate::error::ErrorBody),
    ),
    tag = "items"
)]
async fn upload_evidence(
    State(state): State<AppState>,
    Path((task_id, item_id)): Path<(i64, i64)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if db::tasks::get(&state.pool, task_id).await?.is_none() {
        return Err(AppError::task_not_found(task_id));
    }
    if db::items::get(&state.pool, task_id, item_id).await?.is_none() {
        return Err(AppError::item_not_found(task_id, item_id));
    }

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(sanitize_filename)
            .ok_or_else(|| AppError::BadRequest("uploaded file has no file name".to_string()))?
            .ok_or_else(|| AppError::BadRequest("uploaded file name is not usable".to_string()))?;
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let dir = state.task_upload_dir(task_id);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), &bytes).await?;
        db::items::mark_attachment(&state.pool, task_id, item_id, &filename).await?;

        tracing::info!(task_id, item_id, file = %filename, size = bytes.len(), "evidence uploaded");
        return Ok(Json(UploadResponse {
            message: "file uploaded".to_string(),
            filename,
            size: bytes.len() as u64,
        }));
    }

    Err(AppError::BadRequest(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Reduce a client-supplied file name to a single safe path component.
///
/// Directory parts (either separator) and control characters are dropped,
/// and names longer than [`MAX_FILENAME_BYTES`] are shortened, keeping the
/// extension. Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return None;
    }
    Some(truncate_filename(cleaned))
}

fn truncate_filename(name: &str) -> String {
    if name.len() <= MAX_FILENAME_BYTES {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= MAX_EXTENSION_BYTES => name.split_at(dot),
        _ => (name, ""),
    };
    let mut end = MAX_FILENAME_BYTES - ext.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{ext}", &stem[..end])
}
