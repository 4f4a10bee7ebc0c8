//! Domain building blocks shared by the database, storage, and API crates.
//!
//! This crate has no I/O: it holds identifier types, the domain error enum,
//! the [`meal::Meal`] choice set, submitted-form types with their validation,
//! and the deterministic photo key / URL construction.

pub mod error;
pub mod forms;
pub mod meal;
pub mod photos;
pub mod types;
