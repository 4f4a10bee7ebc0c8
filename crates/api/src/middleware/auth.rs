//! Session gate extractor for Axum handlers.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use catcollector_core::types::DbId;
use catcollector_db::repositories::SessionRepo;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::auth::session::{hash_token, token_from_headers, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Where the gate sends visitors without a session.
pub const LOGIN_URL: &str = "/accounts/login/";

/// Authenticated user extracted from the session cookie or a Bearer token.
///
/// Adding this extractor to a handler gates the route: without a live
/// session the handler body never runs and the visitor is redirected to
/// [`LOGIN_URL`] with the requested path in `next`.
///
/// ```ignore
/// async fn cats_index(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "listing cats");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    /// Hash of the presented token, used by logout to revoke this session.
    pub token_hash: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let login_required = || AppError::LoginRequired {
            next: requested_path(parts),
        };

        let Some(token) = token_from_headers(&parts.headers) else {
            tracing::debug!(path = %parts.uri.path(), "No session token, redirecting to login");
            return Err(login_required());
        };

        let claims = match validate_token(&token, &state.config.session) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return Err(login_required());
            }
        };

        let token_hash = hash_token(&token);
        let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash).await?;
        match session {
            Some(session) if session.user_id == claims.sub => Ok(AuthUser {
                user_id: claims.sub,
                username: claims.username,
                token_hash,
            }),
            _ => {
                tracing::debug!(user_id = claims.sub, "Session revoked or expired");
                Err(login_required())
            }
        }
    }
}

/// The path (and query) the visitor asked for, escaped for use as `next`.
///
/// Uses [`OriginalUri`] when present so nested routers report the full path.
fn requested_path(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);
    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    escape_next(raw)
}

/// Bytes escaped in the `next` query value. Path separators stay readable.
const NEXT_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Percent-encode a path so it survives as a single query value.
fn escape_next(raw: &str) -> String {
    utf8_percent_encode(raw, NEXT_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(escape_next("/cats/"), "/cats/");
        assert_eq!(escape_next("/cats/5/edit"), "/cats/5/edit");
    }

    #[test]
    fn query_characters_are_escaped() {
        assert_eq!(escape_next("/toys/?page=2&x=y"), "/toys/%3Fpage%3D2%26x%3Dy");
    }

    #[test]
    fn escapes_already_encoded_and_non_ascii_input() {
        assert_eq!(escape_next("/cats/?q=a%20b"), "/cats/%3Fq%3Da%2520b");
        assert_eq!(escape_next("/toys/\u{e9}"), "/toys/%C3%A9");
        assert_eq!(escape_next("/cats/#top"), "/cats/%23top");
    }
}
