//! Axum route handlers for the relay gateway.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use relay_adapters::{BodyFetcher, UserRepository};
use relay_core::{bridge, signal_body_presence, User};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::GatewayConfig, error::GatewayError, pool::WorkerPool};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Collaborators shared by every request, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn BodyFetcher>,
    pub users: Arc<dyn UserRepository>,
    pub pool: WorkerPool,
    pub upstream_url: Arc<str>,
    pub lookup_name: Arc<str>,
}

impl AppState {
    /// Bundle the collaborators with the URL and lookup key from `config`.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn BodyFetcher>,
        users: Arc<dyn UserRepository>,
        pool: WorkerPool,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            fetcher,
            users,
            pool,
            upstream_url: Arc::from(config.upstream_url.as_str()),
            lookup_name: Arc::from(config.lookup_name.as_str()),
        }
    }
}

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/callback", get(callback))
        .route("/repository", get(repository))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// `GET /`: fetch the upstream page and log it. Responds with an empty 200.
///
/// # Errors
/// Returns [`GatewayError::Upstream`] if the fetch fails.
pub async fn index(State(state): State<AppState>) -> Result<StatusCode, GatewayError> {
    let body = fetch_upstream(&state).await?;
    tracing::info!(
        url = %state.upstream_url,
        body = body.as_deref().unwrap_or_default(),
        "fetched upstream body"
    );
    Ok(StatusCode::OK)
}

/// `GET /callback`: fetch the upstream page and report the outcome through
/// the callback bridge. Responds with `success` when a body came back.
///
/// # Errors
/// Returns [`GatewayError::Bridge`] if the upstream body was absent or empty,
/// or [`GatewayError::Upstream`] if the fetch itself failed.
pub async fn callback(State(state): State<AppState>) -> Result<&'static str, GatewayError> {
    tracing::info!(url = %state.upstream_url, "bridging upstream fetch through callback");
    let body = fetch_upstream(&state).await?;
    let value = bridge(|cb| signal_body_presence(body.as_deref(), cb)).await?;
    Ok(value)
}

/// `GET /repository`: look up the configured user. Responds with the record,
/// or `null` if it is not stored.
///
/// # Errors
/// Returns [`GatewayError::Worker`] if the lookup task fails.
pub async fn repository(
    State(state): State<AppState>,
) -> Result<Json<Option<User>>, GatewayError> {
    let users = Arc::clone(&state.users);
    let name = Arc::clone(&state.lookup_name);
    let user = state.pool.dispatch(async move { users.find_by_name(&name).await }).await?;
    tracing::debug!(name = %state.lookup_name, found = user.is_some(), "repository lookup");
    Ok(Json(user))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn fetch_upstream(state: &AppState) -> Result<Option<String>, GatewayError> {
    let fetcher = Arc::clone(&state.fetcher);
    let url = Arc::clone(&state.upstream_url);
    let body = state.pool.dispatch(async move { fetcher.get_body(&url).await }).await??;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use relay_adapters::{AdapterError, MemoryUserRepository};
    use tower::ServiceExt;

    use super::*;

    /// Answers every fetch with a fixed body and records the URLs it saw.
    struct StubFetcher {
        body: Option<String>,
        seen: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(body: Option<&str>) -> Self {
            Self { body: body.map(str::to_owned), seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl BodyFetcher for StubFetcher {
        async fn get_body(&self, url: &str) -> Result<Option<String>, AdapterError> {
            match self.seen.lock() {
                Ok(mut seen) => seen.push(url.to_owned()),
                Err(e) => panic!("stub lock poisoned: {e}"),
            }
            Ok(self.body.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl BodyFetcher for FailingFetcher {
        async fn get_body(&self, url: &str) -> Result<Option<String>, AdapterError> {
            Err(AdapterError::UnexpectedStatus { url: url.to_owned(), status: 503 })
        }
    }

    fn test_state(fetcher: Arc<dyn BodyFetcher>, users: MemoryUserRepository) -> AppState {
        let pool = match WorkerPool::new(4) {
            Ok(p) => p,
            Err(e) => panic!("failed to build pool: {e}"),
        };
        let config = GatewayConfig {
            upstream_url: "http://upstream.test/".to_owned(),
            ..GatewayConfig::default()
        };
        AppState::new(fetcher, Arc::new(users), pool, &config)
    }

    fn abid() -> User {
        match User::new("abid", 30) {
            Ok(u) => u,
            Err(e) => panic!("invalid fixture user: {e}"),
        }
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
        let app = create_router(state);
        let req = match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let resp = match app.oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        (status, bytes.to_vec())
    }

    fn json(bytes: &[u8]) -> serde_json::Value {
        match serde_json::from_slice(bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        }
    }

    #[tokio::test]
    async fn callback_with_body_returns_success() {
        let fetcher = Arc::new(StubFetcher::new(Some("<html></html>")));
        let state = test_state(fetcher.clone(), MemoryUserRepository::new());

        let (status, body) = get(state, "/callback").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"success");
        let seen = match fetcher.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(e) => panic!("stub lock poisoned: {e}"),
        };
        assert_eq!(seen, vec!["http://upstream.test/".to_owned()], "must fetch the configured URL");
    }

    #[tokio::test]
    async fn callback_with_absent_body_returns_500() {
        let state = test_state(Arc::new(StubFetcher::new(None)), MemoryUserRepository::new());

        let (status, body) = get(state, "/callback").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["error"], "error");
    }

    #[tokio::test]
    async fn callback_with_empty_body_returns_500() {
        let state = test_state(Arc::new(StubFetcher::new(Some(""))), MemoryUserRepository::new());
        let (status, _) = get(state, "/callback").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "empty body counts as absent");
    }

    #[tokio::test]
    async fn callback_with_failing_upstream_returns_500() {
        let state = test_state(Arc::new(FailingFetcher), MemoryUserRepository::new());
        let (status, body) = get(state, "/callback").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = json(&body)["error"].as_str().map(str::to_owned).unwrap_or_default();
        assert!(message.contains("503"), "error body should describe the upstream failure: {message}");
    }

    #[tokio::test]
    async fn index_returns_empty_200() {
        let state = test_state(Arc::new(StubFetcher::new(Some("page"))), MemoryUserRepository::new());
        let (status, body) = get(state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty(), "index must not echo the upstream body");
    }

    #[tokio::test]
    async fn index_with_absent_body_still_returns_200() {
        let state = test_state(Arc::new(StubFetcher::new(None)), MemoryUserRepository::new());
        let (status, _) = get(state, "/").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn index_with_failing_upstream_returns_500() {
        let state = test_state(Arc::new(FailingFetcher), MemoryUserRepository::new());
        let (status, _) = get(state, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn repository_returns_stored_user() {
        let users = MemoryUserRepository::with_users([abid()]);
        let state = test_state(Arc::new(StubFetcher::new(None)), users);

        let (status, body) = get(state, "/repository").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::json!({"name": "abid", "age": 30}));
    }

    #[tokio::test]
    async fn repository_empty_store_returns_null() {
        let state = test_state(Arc::new(StubFetcher::new(None)), MemoryUserRepository::new());

        let (status, body) = get(state, "/repository").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::Value::Null);
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let state = test_state(Arc::new(StubFetcher::new(None)), MemoryUserRepository::new());
        let (status, body) = get(state, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }
}
