pub mod accounts;
pub mod cats;
pub mod health;
pub mod pages;
pub mod toys;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the application route tree.
///
/// Cat routes and every toy or account change require a session (the
/// handlers take an `AuthUser`). The health route is mounted separately by
/// the router builder.
pub fn app_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(cats::router(config.max_upload_bytes))
        .merge(toys::router())
        .merge(accounts::router())
}
