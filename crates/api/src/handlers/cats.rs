//! Handlers for the `/cats` resource.
//!
//! Every handler is gated by [`AuthUser`] and scoped to the session user's
//! cats. A cat owned by someone else is reported as not found.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use catcollector_core::error::CoreError;
use catcollector_core::forms::{validate_form, CatForm, CatUpdateForm};
use catcollector_core::meal::{meal_choices, Meal, MealChoice};
use catcollector_core::types::DbId;
use catcollector_db::models::cat::{Cat, CreateCat, UpdateCat};
use catcollector_db::models::feeding::Feeding;
use catcollector_db::models::photo::Photo;
use catcollector_db::models::toy::Toy;
use catcollector_db::repositories::{CatRepo, FeedingRepo, PhotoRepo, ToyRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::form_input;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Editable fields on the create form.
const CREATE_FIELDS: [&str; 4] = ["name", "breed", "description", "age"];
/// Editable fields on the edit form. The name is fixed after creation.
const UPDATE_FIELDS: [&str; 3] = ["breed", "description", "age"];

#[derive(Debug, Serialize)]
pub struct CatListContext {
    pub cats: Vec<Cat>,
}

/// Blank feeding input shown on the detail page.
#[derive(Debug, Serialize)]
pub struct FeedingFormContext {
    pub meal: Meal,
    pub meal_choices: Vec<MealChoice>,
}

impl Default for FeedingFormContext {
    fn default() -> Self {
        Self {
            meal: Meal::default(),
            meal_choices: meal_choices(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatDetailContext {
    pub cat: Cat,
    /// Toys not yet linked to this cat.
    pub toys: Vec<Toy>,
    pub cat_toys: Vec<Toy>,
    /// Newest first.
    pub feedings: Vec<Feeding>,
    pub photos: Vec<Photo>,
    pub feeding_form: FeedingFormContext,
}

#[derive(Debug, Serialize)]
pub struct CatFormContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat: Option<Cat>,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct CatDeleteContext {
    pub cat: Cat,
}

/// Load a cat owned by `user_id`, or fail with not found.
pub(crate) async fn owned_cat(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Cat> {
    CatRepo::find_owned(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Cat", id)))
}

/// GET /cats/
pub async fn index(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<CatListContext>> {
    let cats = CatRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(CatListContext { cats }))
}

/// GET /cats/{id}/
pub async fn detail(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CatDetailContext>> {
    let cat = owned_cat(&state, id, user.user_id).await?;

    let toys = ToyRepo::list_not_linked_to_cat(&state.pool, cat.id).await?;
    let cat_toys = CatRepo::list_toys(&state.pool, cat.id).await?;
    let feedings = FeedingRepo::list_by_cat(&state.pool, cat.id).await?;
    let photos = PhotoRepo::list_by_cat(&state.pool, cat.id).await?;

    Ok(Json(CatDetailContext {
        cat,
        toys,
        cat_toys,
        feedings,
        photos,
        feeding_form: FeedingFormContext::default(),
    }))
}

/// GET /cats/new
pub async fn create_form(_user: AuthUser) -> Json<CatFormContext> {
    Json(CatFormContext {
        cat: None,
        fields: &CREATE_FIELDS,
    })
}

/// POST /cats/new
///
/// The owner is always the session user.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    form: Result<Form<CatForm>, FormRejection>,
) -> AppResult<Redirect> {
    let input = form_input(form)?;
    validate_form(&input)?;

    let cat = CatRepo::create(
        &state.pool,
        &CreateCat {
            name: input.name,
            breed: input.breed,
            description: input.description,
            age: input.age,
            user_id: user.user_id,
        },
    )
    .await?;

    tracing::info!(cat_id = cat.id, user_id = user.user_id, "Cat created");
    Ok(Redirect::to(&cat.absolute_url()))
}

/// GET /cats/{id}/edit
pub async fn update_form(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CatFormContext>> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    Ok(Json(CatFormContext {
        cat: Some(cat),
        fields: &UPDATE_FIELDS,
    }))
}

/// POST /cats/{id}/edit
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: Result<Form<CatUpdateForm>, FormRejection>,
) -> AppResult<Redirect> {
    let input = form_input(form)?;
    validate_form(&input)?;

    let cat = CatRepo::update_owned(
        &state.pool,
        id,
        user.user_id,
        &UpdateCat {
            breed: input.breed,
            description: input.description,
            age: input.age,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found("Cat", id)))?;

    Ok(Redirect::to(&cat.absolute_url()))
}

/// GET /cats/{id}/delete
pub async fn delete_confirm(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CatDeleteContext>> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    Ok(Json(CatDeleteContext { cat }))
}

/// POST /cats/{id}/delete
///
/// Feedings, photos, and toy links are removed by cascade.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let deleted = CatRepo::delete_owned(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Cat", id)));
    }

    tracing::info!(cat_id = id, user_id = user.user_id, "Cat deleted");
    Ok(Redirect::to("/cats/"))
}

/// POST /cats/{id}/assoc_toy/{toy_id}
///
/// Linking an already linked toy changes nothing.
pub async fn assoc_toy(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, toy_id)): Path<(DbId, DbId)>,
) -> AppResult<Redirect> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    ToyRepo::find_by_id(&state.pool, toy_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Toy", toy_id)))?;

    CatRepo::add_toy(&state.pool, cat.id, toy_id).await?;
    Ok(Redirect::to(&cat.absolute_url()))
}

/// POST /cats/{id}/unassoc_toy/{toy_id}
pub async fn unassoc_toy(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, toy_id)): Path<(DbId, DbId)>,
) -> AppResult<Redirect> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    CatRepo::remove_toy(&state.pool, cat.id, toy_id).await?;
    Ok(Redirect::to(&cat.absolute_url()))
}
