//! Cat entity model and DTOs.

use std::fmt;

use catcollector_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A cat row from the `cats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cat {
    pub id: DbId,
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    /// Owning user.
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cat {
    /// Canonical detail path for this cat.
    pub fn absolute_url(&self) -> String {
        cat_url(self.id)
    }
}

/// Detail path for the cat with the given id.
pub fn cat_url(id: DbId) -> String {
    format!("/cats/{id}/")
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {} years old", self.name, self.age)
    }
}

/// DTO for creating a new cat. `user_id` is always the session user.
#[derive(Debug, Clone)]
pub struct CreateCat {
    pub name: String,
    pub breed: String,
    pub description: String,
    pub age: i32,
    pub user_id: DbId,
}

/// DTO for editing a cat. There is no name field: names are fixed.
#[derive(Debug, Clone)]
pub struct UpdateCat {
    pub breed: String,
    pub description: String,
    pub age: i32,
}
