//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- signed session tokens and the `sessionid` cookie.

pub mod password;
pub mod session;
