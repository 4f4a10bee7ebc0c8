//! Photo entity model and DTOs.

use std::fmt;

use catcollector_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A photo row from the `photos` table. Rows exist only for uploads that succeeded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub url: String,
    pub cat_id: DbId,
    pub created_at: Timestamp,
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Photo for cat_id: {} @{}", self.cat_id, self.url)
    }
}

/// DTO for recording an uploaded photo.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub url: String,
    pub cat_id: DbId,
}
