//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor, plus the record types the persistence layer
//! returns. All durable state lives in SQLite; the only other shared
//! resource is the upload directory on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sas_core::{Rating, ScoredItem, TaskStatus};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::config::AppConfig;

/// Assessment task record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskRecord {
    pub id: i64,
    pub name: String,
    pub template_id: String,
    pub organization: Option<String>,
    #[schema(value_type = String, example = "draft")]
    pub status: TaskStatus,
    /// Sum of item scores, refreshed whenever an item is rated.
    pub total_score: f64,
    /// Percentage of applicable items rated compliant.
    pub compliance_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One control item of a task, with its current rating.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRecord {
    pub id: i64,
    pub task_id: i64,
    /// Id of the control item in the template it was copied from.
    pub template_item_id: String,
    pub dimension: String,
    /// Requirement text, copied from the template.
    pub control_item: String,
    pub level: String,
    #[schema(value_type = String, example = "not_started")]
    pub rating: Rating,
    pub score: f64,
    pub max_score: f64,
    pub evidence: Option<String>,
    pub remarks: Option<String>,
    pub has_attachment: bool,
}

impl ItemRecord {
    /// View of this item for the scoring routines.
    pub fn scored(&self) -> ScoredItem<'_> {
        ScoredItem {
            dimension: &self.dimension,
            rating: self.rating,
            score: self.score,
            max_score: self.max_score,
        }
    }
}

/// Shared application state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Root directory for evidence uploads.
    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    /// Directory holding the uploads of one task.
    pub fn task_upload_dir(&self, task_id: i64) -> PathBuf {
        self.upload_dir().join(task_id.to_string())
    }
}
