//! Login session tokens.
//!
//! A session token is an HS256-signed JWT carrying the user's id and
//! username. The token travels in the `sessionid` cookie (or an
//! `Authorization: Bearer` header for non-browser clients). Only its SHA-256
//! hash is stored server-side in `user_sessions`, so revoking that row ends
//! the session even while the signature is still valid.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use catcollector_core::types::DbId;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{parse_var, ConfigError};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "sessionid";

/// Default session lifetime in hours (two weeks).
const DEFAULT_EXPIRY_HOURS: i64 = 24 * 14;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's internal database id.
    pub sub: DbId,
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token id, so two logins in the same second still differ.
    pub jti: String,
}

/// Signing secret and cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours.
    pub expiry_hours: i64,
    /// Whether to mark the cookie `Secure` (HTTPS-only).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SESSION_SECRET`        | **yes**  | --      |
    /// | `SESSION_EXPIRY_HOURS`  | no       | `336`   |
    /// | `SESSION_COOKIE_SECURE` | no       | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SESSION_SECRET"))?;

        Ok(Self {
            secret,
            expiry_hours: parse_var("SESSION_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?,
            cookie_secure: parse_var("SESSION_COOKIE_SECURE", false)?,
        })
    }

    /// Session lifetime in seconds.
    pub fn max_age_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }
}

/// Issue a signed session token for a user.
pub fn issue_token(
    user_id: DbId,
    username: &str,
    config: &SessionConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: now + config.max_age_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// SHA-256 hex digest of a token, as stored in `user_sessions.token_hash`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// `Set-Cookie` value that stores `token` for the configured lifetime.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.max_age_secs()))
        .build()
        .to_string()
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie.to_string()
}

/// Find the session token in a request: bearer header first, then cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|t| !t.is_empty())
}
