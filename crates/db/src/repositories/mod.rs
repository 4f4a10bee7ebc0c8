//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cat_repo;
pub mod feeding_repo;
pub mod photo_repo;
pub mod session_repo;
pub mod toy_repo;
pub mod user_repo;

pub use cat_repo::CatRepo;
pub use feeding_repo::FeedingRepo;
pub use photo_repo::PhotoRepo;
pub use session_repo::SessionRepo;
pub use toy_repo::ToyRepo;
pub use user_repo::UserRepo;
