use axum::routing::{get, post};
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// ```text
/// GET,POST  /signup             -> signup_form, signup
/// GET,POST  /accounts/login/    -> login_form, login
/// POST      /accounts/logout/   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", get(accounts::signup_form).post(accounts::signup))
        .route(
            "/accounts/login/",
            get(accounts::login_form).post(accounts::login),
        )
        .route("/accounts/logout/", post(accounts::logout))
}
