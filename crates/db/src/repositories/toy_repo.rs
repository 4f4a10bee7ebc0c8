//! Repository for the `toys` table.

use catcollector_core::types::DbId;
use sqlx::PgPool;

use crate::models::toy::{SaveToy, Toy};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, created_at, updated_at";

/// Provides CRUD operations for the shared toy catalog.
pub struct ToyRepo;

impl ToyRepo {
    /// Insert a new toy, returning the created row.
    pub async fn create(pool: &PgPool, input: &SaveToy) -> Result<Toy, sqlx::Error> {
        let query = format!(
            "INSERT INTO toys (name, color)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a toy by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Toy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toys WHERE id = $1");
        sqlx::query_as::<_, Toy>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every toy, by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toys ORDER BY id");
        sqlx::query_as::<_, Toy>(&query).fetch_all(pool).await
    }

    /// List the toys that are not linked to `cat_id`.
    pub async fn list_not_linked_to_cat(
        pool: &PgPool,
        cat_id: DbId,
    ) -> Result<Vec<Toy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toys
             WHERE id NOT IN (SELECT toy_id FROM cat_toys WHERE cat_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(cat_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a toy's name and color.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveToy,
    ) -> Result<Option<Toy>, sqlx::Error> {
        let query = format!(
            "UPDATE toys SET name = $2, color = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Toy>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a toy. Its cat links cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM toys WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
