//! Repository for the `cats` table and its `cat_toys` link table.
//!
//! Every read and write that a user can trigger is scoped by `user_id`, so a
//! cat owned by someone else behaves exactly like a missing one.

use catcollector_core::types::DbId;
use sqlx::PgPool;

use crate::models::cat::{Cat, CreateCat, UpdateCat};
use crate::models::toy::Toy;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, breed, description, age, user_id, created_at, updated_at";

/// Provides CRUD operations for cats.
pub struct CatRepo;

impl CatRepo {
    /// Insert a new cat, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCat) -> Result<Cat, sqlx::Error> {
        let query = format!(
            "INSERT INTO cats (name, breed, description, age, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(&input.name)
            .bind(&input.breed)
            .bind(&input.description)
            .bind(input.age)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a cat by id only if `user_id` owns it.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the cats owned by a user, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Cat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Cat>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update breed, description, and age of an owned cat.
    ///
    /// Returns `None` if no cat with this id belongs to `user_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateCat,
    ) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!(
            "UPDATE cats SET
                breed = $3,
                description = $4,
                age = $5
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.breed)
            .bind(&input.description)
            .bind(input.age)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned cat. Feedings, photos, and toy links cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a toy to a cat. Linking an existing pair is a no-op.
    ///
    /// Returns `true` if a new link was created.
    pub async fn add_toy(pool: &PgPool, cat_id: DbId, toy_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO cat_toys (cat_id, toy_id) VALUES ($1, $2)
             ON CONFLICT (cat_id, toy_id) DO NOTHING",
        )
        .bind(cat_id)
        .bind(toy_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlink a toy from a cat. Returns `true` if a link was removed.
    pub async fn remove_toy(pool: &PgPool, cat_id: DbId, toy_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cat_toys WHERE cat_id = $1 AND toy_id = $2")
            .bind(cat_id)
            .bind(toy_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The toys linked to a cat, by toy id.
    pub async fn list_toys(pool: &PgPool, cat_id: DbId) -> Result<Vec<Toy>, sqlx::Error> {
        sqlx::query_as::<_, Toy>(
            "SELECT t.id, t.name, t.color, t.created_at, t.updated_at
             FROM toys t
             JOIN cat_toys ct ON ct.toy_id = t.id
             WHERE ct.cat_id = $1
             ORDER BY t.id",
        )
        .bind(cat_id)
        .fetch_all(pool)
        .await
    }
}
