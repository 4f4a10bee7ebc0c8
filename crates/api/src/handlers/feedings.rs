//! Handler for logging a feeding against a cat.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use catcollector_core::forms::FeedingForm;
use catcollector_core::types::DbId;
use catcollector_db::models::feeding::CreateFeeding;
use catcollector_db::repositories::FeedingRepo;

use crate::error::AppResult;
use crate::handlers::cats::owned_cat;
use crate::handlers::form_input;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /cats/{id}/add_feeding
///
/// The cat comes from the path. An invalid date or meal is a 400 and
/// nothing is stored.
pub async fn add_feeding(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: Result<Form<FeedingForm>, FormRejection>,
) -> AppResult<Redirect> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    let feeding = form_input(form)?.validated()?;

    let created = FeedingRepo::create(
        &state.pool,
        &CreateFeeding {
            date: feeding.date,
            meal: feeding.meal,
            cat_id: cat.id,
        },
    )
    .await?;

    tracing::info!(cat_id = cat.id, feeding_id = created.id, "Feeding added");
    Ok(Redirect::to(&cat.absolute_url()))
}
