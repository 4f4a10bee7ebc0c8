//! Row models and input DTOs, one module per table.

pub mod cat;
pub mod feeding;
pub mod photo;
pub mod session;
pub mod toy;
pub mod user;
