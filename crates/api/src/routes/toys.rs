use axum::routing::get;
use axum::Router;

use crate::handlers::toys;
use crate::state::AppState;

/// ```text
/// GET       /toys/             -> index
/// GET       /toys/{id}/        -> detail
/// GET,POST  /toys/new          -> create_form, create
/// GET,POST  /toys/{id}/edit    -> update_form, update
/// GET,POST  /toys/{id}/delete  -> delete_confirm, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toys/", get(toys::index))
        .route("/toys/new", get(toys::create_form).post(toys::create))
        .route("/toys/{id}/", get(toys::detail))
        .route("/toys/{id}/edit", get(toys::update_form).post(toys::update))
        .route(
            "/toys/{id}/delete",
            get(toys::delete_confirm).post(toys::delete),
        )
}
