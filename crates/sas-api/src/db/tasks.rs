//! Assessment task persistence operations.
//!
//! Status is stored as its snake_case identifier. No transition rules are
//! enforced anywhere: any status may be written at any time.

use chrono::{DateTime, Utc};
use sas_core::{Rating, Template, TaskStatus};
use sqlx::{Sqlite, SqlitePool};

use super::parse_or_default;
use crate::state::TaskRecord;

/// Fields of a task that may be changed after creation. `None` leaves the
/// stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub name: Option<String>,
    /// `Some(None)` clears the organization.
    pub organization: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: i64,
    pub draft: i64,
    pub in_progress: i64,
    pub completed: i64,
}

/// Create a draft task and one not-started item per template control item.
///
/// Runs in a single transaction: either the task and all its items exist
/// afterwards, or nothing does. Returns the new task id.
pub async fn insert_with_items(
    pool: &SqlitePool,
    name: &str,
    organization: Option<&str>,
    template: &Template,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let task_id = sqlx::query(
        "INSERT INTO assessment_tasks
             (name, template_id, organization, status, total_score, compliance_rate, created_at, updated_at)
         VALUES (?, ?, ?, ?, 0, 0, ?, ?)",
    )
    .bind(name)
    .bind(&template.id)
    .bind(organization)
    .bind(TaskStatus::Draft.as_str())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for item in &template.items {
        sqlx::query(
            "INSERT INTO assessment_items
                 (task_id, template_item_id, dimension, control_item, level, rating, score, max_score, has_attachment)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?, 0)",
        )
        .bind(task_id)
        .bind(&item.id)
        .bind(&item.dimension)
        .bind(&item.content)
        .bind(&item.level)
        .bind(Rating::NotStarted.as_str())
        .bind(f64::from(item.max_score))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(task_id)
}

/// All tasks, most recently updated first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<TaskRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TaskRow>(
        "SELECT id, name, template_id, organization, status, total_score, compliance_rate, created_at, updated_at
         FROM assessment_tasks ORDER BY updated_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TaskRow::into_record).collect())
}

/// Fetch a task by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<TaskRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, TaskRow>(
        "SELECT id, name, template_id, organization, status, total_score, compliance_rate, created_at, updated_at
         FROM assessment_tasks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(TaskRow::into_record))
}

/// Apply a partial update and bump `updated_at`. Returns whether the task exists.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    changes: &TaskChanges,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE assessment_tasks SET
             name = COALESCE(?1, name),
             organization = CASE WHEN ?2 THEN ?3 ELSE organization END,
             status = COALESCE(?4, status),
             updated_at = ?5
         WHERE id = ?6",
    )
    .bind(changes.name.as_deref())
    .bind(changes.organization.is_some())
    .bind(changes.organization.as_ref().and_then(|o| o.as_deref()))
    .bind(changes.status.map(|s| s.as_str()))
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a task. Its items go with it (`ON DELETE CASCADE`).
/// Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assessment_tasks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Store freshly computed aggregates and bump `updated_at`.
pub async fn update_aggregates<'e, E>(
    executor: E,
    id: i64,
    total_score: f64,
    compliance_rate: f64,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "UPDATE assessment_tasks SET total_score = ?, compliance_rate = ?, updated_at = ? WHERE id = ?",
    )
    .bind(total_score)
    .bind(compliance_rate)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count tasks, overall and per status.
pub async fn status_counts(pool: &SqlitePool) -> Result<StatusCounts, sqlx::Error> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM assessment_tasks GROUP BY status")
            .fetch_all(pool)
            .await?;

    let mut counts = StatusCounts::default();
    for (status, n) in rows {
        counts.total += n;
        match status.parse::<TaskStatus>() {
            Ok(TaskStatus::Draft) => counts.draft += n,
            Ok(TaskStatus::InProgress) => counts.in_progress += n,
            Ok(TaskStatus::Completed) => counts.completed += n,
            Err(e) => tracing::warn!(status = %status, error = %e, "uncounted task status"),
        }
    }
    Ok(counts)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    template_id: String,
    organization: Option<String>,
    status: String,
    total_score: f64,
    compliance_rate: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_record(self) -> TaskRecord {
        TaskRecord {
            status: parse_or_default("status", self.id, &self.status),
            id: self.id,
            name: self.name,
            template_id: self.template_id,
            organization: self.organization,
            total_score: self.total_score,
            compliance_rate: self.compliance_rate,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{init_pool, items, templates};
    use sas_core::catalog::djcp;

    async fn seeded_pool() -> SqlitePool {
        let pool = init_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        templates::seed(&pool, &sas_core::builtin_templates())
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn insert_copies_every_template_item() {
        let pool = seeded_pool().await;
        let template = djcp::template();

        let id = insert_with_items(&pool, "2026 等保自查", Some("Acme"), &template)
            .await
            .unwrap();

        let task = get(&pool, id).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Draft);
        assert_eq!(task.template_id, "djcp");
        assert_eq!(task.organization.as_deref(), Some("Acme"));
        assert_eq!(task.total_score, 0.0);

        let items = items::list_for_task(&pool, id).await.unwrap();
        assert_eq!(items.len(), template.items.len());
        assert!(items.iter().all(|i| i.rating == Rating::NotStarted));
        assert_eq!(items[0].template_item_id, "djcp-tech-01");
        assert_eq!(items[0].max_score, 5.0);
    }

    #[tokio::test]
    async fn insert_with_unknown_template_rolls_back() {
        let pool = seeded_pool().await;
        let mut template = djcp::template();
        template.id = "not-seeded".to_string();

        assert!(insert_with_items(&pool, "orphan", None, &template).await.is_err());
        assert!(list(&pool).await.unwrap().is_empty());
        let (orphans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assessment_items")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn partial_update_keeps_unset_fields() {
        let pool = seeded_pool().await;
        let id = insert_with_items(&pool, "before", Some("Acme"), &djcp::template())
            .await
            .unwrap();

        let changes = TaskChanges {
            status: Some(TaskStatus::Completed),
            ..TaskChanges::default()
        };
        assert!(update(&pool, id, &changes).await.unwrap());

        let task = get(&pool, id).await.unwrap().unwrap();
        assert_eq!(task.name, "before");
        assert_eq!(task.organization.as_deref(), Some("Acme"));
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.updated_at >= task.created_at);

        // Completed back to draft is allowed.
        let changes = TaskChanges {
            status: Some(TaskStatus::Draft),
            name: Some("after".to_string()),
            ..TaskChanges::default()
        };
        assert!(update(&pool, id, &changes).await.unwrap());
        let task = get(&pool, id).await.unwrap().unwrap();
        assert_eq!(task.name, "after");
        assert_eq!(task.status, TaskStatus::Draft);
        assert_eq!(task.organization.as_deref(), Some("Acme"));

        let changes = TaskChanges {
            organization: Some(None),
            ..TaskChanges::default()
        };
        assert!(update(&pool, id, &changes).await.unwrap());
        let task = get(&pool, id).await.unwrap().unwrap();
        assert!(task.organization.is_none());
        assert_eq!(task.name, "after");

        assert!(!update(&pool, id + 100, &changes).await.unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_to_items() {
        let pool = seeded_pool().await;
        let id = insert_with_items(&pool, "doomed", None, &djcp::template())
            .await
            .unwrap();

        assert!(delete(&pool, id).await.unwrap());
        assert!(get(&pool, id).await.unwrap().is_none());
        assert!(items::list_for_task(&pool, id).await.unwrap().is_empty());
        assert!(!delete(&pool, id).await.unwrap());
    }

    #[tokio::test]
    async fn list_orders_by_most_recent_update() {
        let pool = seeded_pool().await;
        let template = djcp::template();
        let first = insert_with_items(&pool, "first", None, &template).await.unwrap();
        let second = insert_with_items(&pool, "second", None, &template).await.unwrap();

        let ids: Vec<_> = list(&pool).await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, [second, first]);

        update_aggregates(&pool, first, 5.0, 100.0).await.unwrap();
        let tasks = list(&pool).await.unwrap();
        assert_eq!(tasks[0].id, first);
        assert_eq!(tasks[0].total_score, 5.0);
        assert_eq!(tasks[0].compliance_rate, 100.0);
    }

    #[tokio::test]
    async fn status_counts_group_by_status() {
        let pool = seeded_pool().await;
        let template = djcp::template();
        let a = insert_with_items(&pool, "a", None, &template).await.unwrap();
        let b = insert_with_items(&pool, "b", None, &template).await.unwrap();
        insert_with_items(&pool, "c", None, &template).await.unwrap();

        let set = |status| TaskChanges {
            status: Some(status),
            ..TaskChanges::default()
        };
        update(&pool, a, &set(TaskStatus::InProgress)).await.unwrap();
        update(&pool, b, &set(TaskStatus::Completed)).await.unwrap();

        let counts = status_counts(&pool).await.unwrap();
        assert_eq!(
            counts,
            StatusCounts {
                total: 3,
                draft: 1,
                in_progress: 1,
                completed: 1,
            }
        );
    }
}
