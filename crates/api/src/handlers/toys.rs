//! Handlers for the `/toys` resource.
//!
//! Toys form one shared catalog. Reading is open; changes need a session.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use catcollector_core::error::CoreError;
use catcollector_core::forms::{validate_form, ToyForm};
use catcollector_core::types::DbId;
use catcollector_db::models::toy::{SaveToy, Toy};
use catcollector_db::repositories::ToyRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::form_input;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const FIELDS: [&str; 2] = ["name", "color"];

#[derive(Debug, Serialize)]
pub struct ToyListContext {
    pub toys: Vec<Toy>,
}

#[derive(Debug, Serialize)]
pub struct ToyContext {
    pub toy: Toy,
}

#[derive(Debug, Serialize)]
pub struct ToyFormContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toy: Option<Toy>,
    pub fields: &'static [&'static str],
}

async fn find_toy(state: &AppState, id: DbId) -> AppResult<Toy> {
    ToyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Toy", id)))
}

fn save_toy(form: Result<Form<ToyForm>, FormRejection>) -> AppResult<SaveToy> {
    let input = form_input(form)?;
    validate_form(&input)?;
    Ok(SaveToy {
        name: input.name,
        color: input.color,
    })
}

/// GET /toys/
pub async fn index(State(state): State<AppState>) -> AppResult<Json<ToyListContext>> {
    let toys = ToyRepo::list(&state.pool).await?;
    Ok(Json(ToyListContext { toys }))
}

/// GET /toys/{id}/
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ToyContext>> {
    let toy = find_toy(&state, id).await?;
    Ok(Json(ToyContext { toy }))
}

/// GET /toys/new
pub async fn create_form(_user: AuthUser) -> Json<ToyFormContext> {
    Json(ToyFormContext {
        toy: None,
        fields: &FIELDS,
    })
}

/// POST /toys/new
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    form: Result<Form<ToyForm>, FormRejection>,
) -> AppResult<Redirect> {
    let toy = ToyRepo::create(&state.pool, &save_toy(form)?).await?;
    Ok(Redirect::to(&toy.absolute_url()))
}

/// GET /toys/{id}/edit
pub async fn update_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ToyFormContext>> {
    let toy = find_toy(&state, id).await?;
    Ok(Json(ToyFormContext {
        toy: Some(toy),
        fields: &FIELDS,
    }))
}

/// POST /toys/{id}/edit
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    form: Result<Form<ToyForm>, FormRejection>,
) -> AppResult<Redirect> {
    let toy = ToyRepo::update(&state.pool, id, &save_toy(form)?)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Toy", id)))?;
    Ok(Redirect::to(&toy.absolute_url()))
}

/// GET /toys/{id}/delete
pub async fn delete_confirm(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ToyContext>> {
    let toy = find_toy(&state, id).await?;
    Ok(Json(ToyContext { toy }))
}

/// POST /toys/{id}/delete
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !ToyRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Toy", id)));
    }
    tracing::info!(toy_id = id, user_id = user.user_id, "Toy deleted");
    Ok(Redirect::to("/toys/"))
}
