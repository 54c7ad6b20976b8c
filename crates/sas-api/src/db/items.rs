//! Assessment item persistence operations.
//!
//! Items are addressed by `(task_id, item_id)`: an item id that belongs to
//! another task is treated as absent.

use sas_core::Rating;
use sqlx::{Sqlite, SqlitePool};

use super::parse_or_default;
use crate::state::ItemRecord;

/// All items of a task, in creation (template) order.
pub async fn list_for_task<'e, E>(executor: E, task_id: i64) -> Result<Vec<ItemRecord>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ItemRow>(
        "SELECT id, task_id, template_item_id, dimension, control_item, level, rating, score,
                max_score, evidence, remarks, has_attachment
         FROM assessment_items WHERE task_id = ? ORDER BY id",
    )
    .bind(task_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(ItemRow::into_record).collect())
}

/// Fetch one item of a task.
pub async fn get(
    pool: &SqlitePool,
    task_id: i64,
    item_id: i64,
) -> Result<Option<ItemRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, ItemRow>(
        "SELECT id, task_id, template_item_id, dimension, control_item, level, rating, score,
                max_score, evidence, remarks, has_attachment
         FROM assessment_items WHERE id = ? AND task_id = ?",
    )
    .bind(item_id)
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ItemRow::into_record))
}

/// A new rating for one item, with optional evidence and remarks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdate<'a> {
    pub rating: Rating,
    pub score: f64,
    /// Replaces the stored evidence when `Some`.
    pub evidence: Option<&'a str>,
    /// Replaces the stored remarks when `Some`.
    pub remarks: Option<&'a str>,
}

/// Store a rating and its score. Returns whether the item exists in the task.
pub async fn update_rating<'e, E>(
    executor: E,
    task_id: i64,
    item_id: i64,
    update: &RatingUpdate<'_>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "UPDATE assessment_items SET
             rating = ?,
             score = ?,
             evidence = COALESCE(?, evidence),
             remarks = COALESCE(?, remarks)
         WHERE id = ? AND task_id = ?",
    )
    .bind(update.rating.as_str())
    .bind(update.score)
    .bind(update.evidence)
    .bind(update.remarks)
    .bind(item_id)
    .bind(task_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// The evidence line recorded for an uploaded file.
pub fn attachment_marker(filename: &str) -> String {
    format!("[attachment: {filename}]")
}

/// Flag an item as having an attachment and append the attachment marker
/// to its evidence on a new line. Returns whether the item exists in the task.
pub async fn mark_attachment(
    pool: &SqlitePool,
    task_id: i64,
    item_id: i64,
    filename: &str,
) -> Result<bool, sqlx::Error> {
    let marker = attachment_marker(filename);
    let result = sqlx::query(
        "UPDATE assessment_items SET
             has_attachment = 1,
             evidence = CASE
                 WHEN evidence IS NULL OR evidence = '' THEN ?1
                 ELSE evidence || char(10) || ?1
             END
         WHERE id = ?2 AND task_id = ?3",
    )
    .bind(&marker)
    .bind(item_id)
    .bind(task_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    task_id: i64,
    template_item_id: String,
    dimension: String,
    control_item: String,
    level: String,
    rating: String,
    score: f64,
    max_score: f64,
    evidence: Option<String>,
    remarks: Option<String>,
    has_attachment: bool,
}

impl ItemRow {
    fn into_record(self) -> ItemRecord {
        ItemRecord {
            rating: parse_or_default("rating", self.id, &self.rating),
            id: self.id,
            task_id: self.task_id,
            template_item_id: self.template_item_id,
            dimension: self.dimension,
            control_item: self.control_item,
            level: self.level,
            score: self.score,
            max_score: self.max_score,
            evidence: self.evidence,
            remarks: self.remarks,
            has_attachment: self.has_attachment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{init_pool, tasks, templates};
    use sas_core::catalog::grxxb;

    async fn pool_with_task() -> (SqlitePool, i64) {
        let pool = init_pool(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        templates::seed(&pool, &sas_core::builtin_templates())
            .await
            .unwrap();
        let id = tasks::insert_with_items(&pool, "pi review", None, &grxxb::template())
            .await
            .unwrap();
        (pool, id)
    }

    #[tokio::test]
    async fn rating_update_keeps_unset_text() {
        let (pool, task_id) = pool_with_task().await;
        let item_id = list_for_task(&pool, task_id).await.unwrap()[0].id;

        let first = RatingUpdate {
            rating: Rating::Partial,
            score: 2.5,
            evidence: Some("policy v1"),
            remarks: Some("needs owner"),
        };
        assert!(update_rating(&pool, task_id, item_id, &first).await.unwrap());

        let second = RatingUpdate {
            rating: Rating::Compliant,
            score: 5.0,
            evidence: None,
            remarks: None,
        };
        assert!(update_rating(&pool, task_id, item_id, &second).await.unwrap());

        let item = get(&pool, task_id, item_id).await.unwrap().unwrap();
        assert_eq!(item.rating, Rating::Compliant);
        assert_eq!(item.score, 5.0);
        assert_eq!(item.evidence.as_deref(), Some("policy v1"));
        assert_eq!(item.remarks.as_deref(), Some("needs owner"));
    }

    #[tokio::test]
    async fn items_are_scoped_to_their_task() {
        let (pool, task_id) = pool_with_task().await;
        let other = tasks::insert_with_items(&pool, "other", None, &grxxb::template())
            .await
            .unwrap();
        let foreign_item = list_for_task(&pool, other).await.unwrap()[0].id;

        assert!(get(&pool, task_id, foreign_item).await.unwrap().is_none());
        let update = RatingUpdate {
            rating: Rating::Compliant,
            score: 5.0,
            evidence: None,
            remarks: None,
        };
        assert!(!update_rating(&pool, task_id, foreign_item, &update).await.unwrap());
        assert!(!mark_attachment(&pool, task_id, foreign_item, "x.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn attachment_marker_appended_on_new_line() {
        let (pool, task_id) = pool_with_task().await;
        let item_id = list_for_task(&pool, task_id).await.unwrap()[1].id;

        assert!(mark_attachment(&pool, task_id, item_id, "a.pdf").await.unwrap());
        let item = get(&pool, task_id, item_id).await.unwrap().unwrap();
        assert!(item.has_attachment);
        assert_eq!(item.evidence.as_deref(), Some("[attachment: a.pdf]"));

        mark_attachment(&pool, task_id, item_id, "b.png").await.unwrap();
        let item = get(&pool, task_id, item_id).await.unwrap().unwrap();
        assert_eq!(
            item.evidence.as_deref(),
            Some("[attachment: a.pdf]\n[attachment: b.png]")
        );
    }
}
