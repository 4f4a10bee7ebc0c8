//! Toy entity model and DTOs.

use std::fmt;

use catcollector_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A toy row from the `toys` table. Toys form a catalog shared by all users.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Toy {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Toy {
    /// Canonical detail path for this toy.
    pub fn absolute_url(&self) -> String {
        toy_url(self.id)
    }
}

/// Detail path for the toy with the given id.
pub fn toy_url(id: DbId) -> String {
    format!("/toys/{id}/")
}

impl fmt::Display for Toy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// DTO for creating or replacing a toy's fields.
#[derive(Debug, Clone)]
pub struct SaveToy {
    pub name: String,
    pub color: String,
}
