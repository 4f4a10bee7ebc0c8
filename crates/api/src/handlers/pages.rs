//! Static pages.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageContext {
    pub page: &'static str,
}

/// GET /
pub async fn home() -> Json<PageContext> {
    Json(PageContext { page: "home" })
}

/// GET /about
pub async fn about() -> Json<PageContext> {
    Json(PageContext { page: "about" })
}
