//! Request extractors that guard routes.
//!
//! - [`auth::AuthUser`] -- Requires a live login session, otherwise redirects
//!   to the login page.

pub mod auth;
