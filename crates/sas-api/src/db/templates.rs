//! Template persistence operations.
//!
//! Templates are stored whole: dimensions and items as JSON columns. Rows
//! are read back in seeding order (`rowid`).

use chrono::Utc;
use sas_core::{ControlItem, Dimension, Template};
use sqlx::types::Json;
use sqlx::SqlitePool;

/// Insert every template whose id is not yet present.
///
/// Existing rows are left untouched, so calling this on every startup is
/// safe. Returns the number of templates inserted.
pub async fn seed(pool: &SqlitePool, templates: &[Template]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let mut inserted = 0;

    for template in templates {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO standard_templates
                 (id, name, standard_no, version, description, dimensions, items, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)",
        )
        .bind(&template.id)
        .bind(&template.name)
        .bind(&template.standard_no)
        .bind(&template.version)
        .bind(&template.description)
        .bind(Json(&template.dimensions))
        .bind(Json(&template.items))
        .bind(now)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// All active templates, in seeding order.
pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Template>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TemplateRow>(
        "SELECT id, name, standard_no, version, description, dimensions, items
         FROM standard_templates WHERE is_active = 1 ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TemplateRow::into_template).collect())
}

/// Fetch a template by id, active or not.
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<Template>, sqlx::Error> {
    let row = sqlx::query_as::<_, TemplateRow>(
        "SELECT id, name, standard_no, version, description, dimensions, items
         FROM standard_templates WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(TemplateRow::into_template))
}

/// Show or hide a template in listings. Returns whether the template exists.
pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE standard_templates SET is_active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: String,
    name: String,
    standard_no: String,
    version: String,
    description: String,
    dimensions: Json<Vec<Dimension>>,
    items: Json<Vec<ControlItem>>,
}

impl TemplateRow {
    fn into_template(self) -> Template {
        Template {
            id: self.id,
            name: self.name,
            standard_no: self.standard_no,
            version: self.version,
            description: self.description,
            dimensions: self.dimensions.0,
            items: self.items.0,
        }
    }
}
