#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use catcollector_api::auth::session::SessionConfig;
use catcollector_api::config::ServerConfig;
use catcollector_api::router::build_app_router;
use catcollector_api::state::AppState;
use catcollector_db::models::cat::Cat;
use catcollector_storage::{ObjectStore, StorageConfig, StorageError};
use cookie::Cookie;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "cat-photos-test";
pub const TEST_PASSWORD: &str = "whiskers-and-yarn";
pub const TEST_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
            expiry_hours: 1,
            cookie_secure: false,
        },
        storage: StorageConfig {
            bucket: TEST_BUCKET.to_string(),
            base_url: "https://s3.us-east-2.amazonaws.com/".to_string(),
            key_prefix: "catcollector".to_string(),
            region: None,
            endpoint_url: None,
        },
    }
}

/// An object put recorded by [`RecordingStore`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Object store double that accepts and remembers every put.
#[derive(Default)]
pub struct RecordingStore {
    pub puts: Mutex<Vec<StoredObject>>,
}

impl RecordingStore {
    pub fn objects(&self) -> Vec<StoredObject> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        self.puts.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.map(str::to_string),
        });
        Ok(())
    }
}

/// Object store double whose puts always fail.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_object(
        &self,
        _bucket: &str,
        key: &str,
        _body: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<(), StorageError> {
        Err(StorageError::Upload {
            key: key.to_string(),
            message: "connection reset".to_string(),
        })
    }
}

/// Build the full application router backed by a [`RecordingStore`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(RecordingStore::default()))
}

/// Build the full application router with the given object store.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app_with_store(pool: PgPool, store: Arc<dyn ObjectStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store,
    };
    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    get_as(app, uri, None).await
}

/// GET with an optional `sessionid=...` cookie.
pub async fn get_as(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// POST an urlencoded form with an optional session cookie.
pub async fn post_form(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response {
    let body = serde_urlencoded::to_string(fields).unwrap();

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

/// POST a multipart body with a single file field.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    data: &[u8],
    cookie: Option<&str>,
) -> Response {
    const BOUNDARY: &str = "----catcollector-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_is_empty(response: Response) -> bool {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .is_empty()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
        .to_string()
}

/// The `sessionid=<token>` pair from a `Set-Cookie` header.
pub fn session_cookie(response: &Response) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    Cookie::parse(header).unwrap().stripped().to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up `username` and return its session cookie.
pub async fn signup(pool: &PgPool, username: &str) -> String {
    let response = post_form(
        build_test_app(pool.clone()),
        "/signup",
        &[
            ("username", username),
            ("password1", TEST_PASSWORD),
            ("password2", TEST_PASSWORD),
        ],
        None,
    )
    .await;
    assert_eq!(response.status(), 303, "signup for {username} should succeed");
    session_cookie(&response)
}

/// Create a cat through the API and return its id.
pub async fn create_cat(pool: &PgPool, cookie: &str, name: &str) -> i64 {
    let response = post_form(
        build_test_app(pool.clone()),
        "/cats/new",
        &[
            ("name", name),
            ("breed", "Tabby"),
            ("description", "Likes boxes"),
            ("age", "3"),
        ],
        Some(cookie),
    )
    .await;
    assert_eq!(response.status(), 303);
    id_from_location(&location(&response), "/cats/")
}

/// Create a toy through the API and return its id.
pub async fn create_toy(pool: &PgPool, cookie: &str, name: &str, color: &str) -> i64 {
    let response = post_form(
        build_test_app(pool.clone()),
        "/toys/new",
        &[("name", name), ("color", color)],
        Some(cookie),
    )
    .await;
    assert_eq!(response.status(), 303);
    id_from_location(&location(&response), "/toys/")
}

/// Load a cat row regardless of owner.
pub async fn find_cat(pool: &PgPool, id: i64) -> Option<Cat> {
    sqlx::query_as::<_, Cat>(
        "SELECT id, name, breed, description, age, user_id, created_at, updated_at
         FROM cats WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .unwrap()
}

/// Parse the id out of a detail URL such as `/cats/12/`.
pub fn id_from_location(location: &str, prefix: &str) -> i64 {
    location
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix('/'))
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("unexpected location {location}"))
}
