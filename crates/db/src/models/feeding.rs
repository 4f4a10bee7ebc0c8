//! Feeding entity model and DTOs.

use std::fmt;

use catcollector_core::meal::Meal;
use catcollector_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A feeding row from the `feedings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feeding {
    pub id: DbId,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub meal: Meal,
    pub cat_id: DbId,
    pub created_at: Timestamp,
}

impl fmt::Display for Feeding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.meal.label(), self.date.format("%Y-%m-%d"))
    }
}

/// DTO for creating a feeding. `cat_id` always comes from the request path.
#[derive(Debug, Clone)]
pub struct CreateFeeding {
    pub date: NaiveDate,
    pub meal: Meal,
    pub cat_id: DbId,
}
