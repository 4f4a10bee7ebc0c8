//! Repository for the `feedings` table.

use catcollector_core::types::DbId;
use sqlx::PgPool;

use crate::models::feeding::{CreateFeeding, Feeding};

const COLUMNS: &str = "id, date, meal, cat_id, created_at";

pub struct FeedingRepo;

impl FeedingRepo {
    /// Insert a feeding for `input.cat_id`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFeeding) -> Result<Feeding, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedings (date, meal, cat_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feeding>(&query)
            .bind(input.date)
            .bind(input.meal.code())
            .bind(input.cat_id)
            .fetch_one(pool)
            .await
    }

    /// A cat's feedings, most recent date first.
    pub async fn list_by_cat(pool: &PgPool, cat_id: DbId) -> Result<Vec<Feeding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedings WHERE cat_id = $1 ORDER BY date DESC, id DESC"
        );
        sqlx::query_as::<_, Feeding>(&query)
            .bind(cat_id)
            .fetch_all(pool)
            .await
    }
}
