//! Signup, login, and logout.
//!
//! Signup and login answer invalid submissions with their form context and a
//! generic message, never field-level detail. Both start a session on
//! success by storing a session row and setting the `sessionid` cookie.

use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::header::{SET_COOKIE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use catcollector_core::forms::{LoginForm, SignupForm};
use catcollector_db::models::session::CreateSession;
use catcollector_db::models::user::{CreateUser, User};
use catcollector_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{clear_session_cookie, hash_token, issue_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Shown for every rejected signup.
pub const SIGNUP_ERROR: &str = "Invalid sign up - try again";

/// Shown for every rejected login.
pub const LOGIN_ERROR: &str = "Please enter a correct username and password";

/// Where a successful login lands when no usable `next` was given.
pub const LOGIN_REDIRECT_URL: &str = "/cats/";

/// Unique constraint guarding `users.username`.
const USERNAME_CONSTRAINT: &str = "uq_users_username";

/// Longest user agent string kept on a session row.
const MAX_USER_AGENT_LENGTH: usize = 512;

#[derive(Debug, Serialize)]
pub struct SignupContext {
    pub username: String,
    pub error_message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginContext {
    pub username: String,
    pub next: String,
    pub error_message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// GET /signup
pub async fn signup_form() -> Json<SignupContext> {
    Json(SignupContext {
        username: String::new(),
        error_message: "",
    })
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<SignupForm>, FormRejection>,
) -> AppResult<Response> {
    let Ok(Form(input)) = form else {
        return Ok(signup_rejected(String::new()));
    };

    if let Err(e) = input.validated() {
        tracing::debug!(error = %e, "Signup rejected");
        return Ok(signup_rejected(input.username));
    }

    let password_hash = hash_password(&input.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username.clone(),
            password_hash,
        },
    )
    .await;
    let user = match created {
        Ok(user) => user,
        Err(e) if is_username_taken(&e) => {
            tracing::debug!(username = %input.username, "Signup rejected: username taken");
            return Ok(signup_rejected(input.username));
        }
        Err(e) => return Err(e.into()),
    };

    let cookie = start_session(&state, &user, &headers).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User signed up");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")).into_response())
}

/// GET /accounts/login/
pub async fn login_form(Query(query): Query<LoginQuery>) -> Json<LoginContext> {
    Json(LoginContext {
        username: String::new(),
        next: query.next.unwrap_or_default(),
        error_message: "",
    })
}

/// POST /accounts/login/
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    let Ok(Form(input)) = form else {
        return Ok(login_rejected(String::new(), None));
    };

    let user = match UserRepo::find_by_username(&state.pool, &input.username).await? {
        Some(user) if user.is_active => user,
        _ => {
            tracing::debug!(username = %input.username, "Login rejected: unknown or inactive user");
            return Ok(login_rejected(input.username, input.next));
        }
    };

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Ok(login_rejected(input.username, input.next));
    }

    let target = safe_next(input.next.as_deref());
    UserRepo::record_login(&state.pool, user.id).await?;
    let cookie = start_session(&state, &user, &headers).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(target)).into_response())
}

/// POST /accounts/logout/
pub async fn logout(user: AuthUser, State(state): State<AppState>) -> AppResult<Response> {
    SessionRepo::revoke_by_token_hash(&state.pool, &user.token_hash).await?;
    tracing::info!(user_id = user.user_id, "User logged out");
    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response())
}

/// Issue a token, persist its session row, and return the `Set-Cookie` value.
async fn start_session(state: &AppState, user: &User, headers: &HeaderMap) -> AppResult<String> {
    let config = &state.config.session;
    let token = issue_token(user.id, &user.username, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect());

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash: hash_token(&token),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(config.expiry_hours),
            user_agent,
        },
    )
    .await?;

    Ok(session_cookie(&token, config))
}

fn signup_rejected(username: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(SignupContext {
            username,
            error_message: SIGNUP_ERROR,
        }),
    )
        .into_response()
}

fn login_rejected(username: String, next: Option<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(LoginContext {
            username,
            next: next.unwrap_or_default(),
            error_message: LOGIN_ERROR,
        }),
    )
        .into_response()
}

/// Whether an insert failed on the unique username constraint.
fn is_username_taken(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(USERNAME_CONSTRAINT))
}

/// The post-login target: `next` when it is a path on this site that can go
/// in a `Location` header, otherwise [`LOGIN_REDIRECT_URL`].
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => LOGIN_REDIRECT_URL,
    }
}
