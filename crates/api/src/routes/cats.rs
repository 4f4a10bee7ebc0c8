//! Route definitions for the `/cats` resource.
//!
//! Paths are registered in full because detail pages carry a trailing slash
//! while the action paths do not.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{cats, feedings, photos};
use crate::state::AppState;

/// ```text
/// GET       /cats/                               -> index
/// GET       /cats/{id}/                          -> detail
/// GET,POST  /cats/new                            -> create_form, create
/// GET,POST  /cats/{id}/edit                      -> update_form, update
/// GET,POST  /cats/{id}/delete                    -> delete_confirm, delete
/// POST      /cats/{id}/add_photo                 -> photos::add_photo
/// POST      /cats/{id}/add_feeding               -> feedings::add_feeding
/// POST      /cats/{id}/assoc_toy/{toy_id}        -> assoc_toy
/// POST      /cats/{id}/unassoc_toy/{toy_id}      -> unassoc_toy
/// ```
///
/// The photo route replaces the default request body limit with
/// `max_upload_bytes`.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/cats/", get(cats::index))
        .route("/cats/new", get(cats::create_form).post(cats::create))
        .route("/cats/{id}/", get(cats::detail))
        .route("/cats/{id}/edit", get(cats::update_form).post(cats::update))
        .route(
            "/cats/{id}/delete",
            get(cats::delete_confirm).post(cats::delete),
        )
        .route(
            "/cats/{id}/add_photo",
            post(photos::add_photo).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/cats/{id}/add_feeding", post(feedings::add_feeding))
        .route("/cats/{id}/assoc_toy/{toy_id}", post(cats::assoc_toy))
        .route("/cats/{id}/unassoc_toy/{toy_id}", post(cats::unassoc_toy))
}
