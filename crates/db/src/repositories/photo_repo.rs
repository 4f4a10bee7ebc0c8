//! Repository for the `photos` table.

use catcollector_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo};

const COLUMNS: &str = "id, url, cat_id, created_at";

pub struct PhotoRepo;

impl PhotoRepo {
    /// Record an uploaded photo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (url, cat_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(&input.url)
            .bind(input.cat_id)
            .fetch_one(pool)
            .await
    }

    /// A cat's photos in upload order.
    pub async fn list_by_cat(pool: &PgPool, cat_id: DbId) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE cat_id = $1 ORDER BY id");
        sqlx::query_as::<_, Photo>(&query)
            .bind(cat_id)
            .fetch_all(pool)
            .await
    }
}
