//! HTTP server and per-request dispatch
//!
//! A single fallback handler owns every path so key validation always sees
//! the raw request path, including `/` and multi-segment paths. Dispatch
//! happens on a tagged method type first; only the three methods with key
//! semantics ever look at the path.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use file_image_cache::ImageCache;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::proxy::ImageFetcher;
use crate::validation::{extract_key, CacheKey, KeyOutcome};

/// Hint returned with every 400
const USAGE_HINT: &str = "Bad Request: expected a numeric status code, e.g. /200";

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: ImageCache,
    pub fetcher: ImageFetcher,
}

impl ServerState {
    pub fn new(cache: ImageCache, fetcher: ImageFetcher) -> Self {
        Self { cache, fetcher }
    }
}

pub type SharedState = Arc<ServerState>;

/// The methods the proxy understands, everything else collapsed to `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheMethod {
    Get,
    Put,
    Delete,
    Other,
}

impl From<&Method> for CacheMethod {
    fn from(method: &Method) -> Self {
        if *method == Method::GET {
            CacheMethod::Get
        } else if *method == Method::PUT {
            CacheMethod::Put
        } else if *method == Method::DELETE {
            CacheMethod::Delete
        } else {
            CacheMethod::Other
        }
    }
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "Proxy server running");

    axum::serve(listener, router).await
}

/// Entry point for every request
async fn handle_request(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match CacheMethod::from(&method) {
        CacheMethod::Get => handle_get(&state, uri.path()).await,
        CacheMethod::Put => handle_put(&state, uri.path(), body).await,
        CacheMethod::Delete => handle_delete(&state, uri.path()).await,
        CacheMethod::Other => text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
    }
}

/// Serve from cache, falling back to an upstream fetch that populates it
async fn handle_get(state: &ServerState, path: &str) -> Response {
    let key = match extract_key(path) {
        KeyOutcome::Key(key) => key,
        KeyOutcome::Ignore => return StatusCode::NOT_FOUND.into_response(),
        KeyOutcome::Invalid => return text(StatusCode::BAD_REQUEST, USAGE_HINT),
    };

    if let Some(data) = state.cache.get(key.as_str()).await {
        return image(data);
    }

    match state.fetcher.fetch(&key).await {
        Ok(data) => {
            // Persist before responding; the response is served even if
            // persistence fails
            if let Err(e) = state.cache.put(key.as_str(), &data).await {
                warn!(key = %key, error = %e, "Failed to cache fetched image");
            }
            image(data)
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Upstream fetch failed");
            text(StatusCode::NOT_FOUND, "Not Found")
        }
    }
}

/// Store the request body verbatim as the entry for the key
async fn handle_put(state: &ServerState, path: &str, body: Bytes) -> Response {
    let key = match extract_key(path) {
        KeyOutcome::Key(key) => key,
        KeyOutcome::Ignore => return StatusCode::NOT_FOUND.into_response(),
        KeyOutcome::Invalid => return text(StatusCode::BAD_REQUEST, USAGE_HINT),
    };

    match state.cache.put(key.as_str(), &body).await {
        Ok(()) => text(StatusCode::CREATED, "Created"),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to store image");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Remove the entry for the key
async fn handle_delete(state: &ServerState, path: &str) -> Response {
    let key = match extract_key(path) {
        KeyOutcome::Key(key) => key,
        KeyOutcome::Ignore => return StatusCode::NOT_FOUND.into_response(),
        KeyOutcome::Invalid => return text(StatusCode::BAD_REQUEST, USAGE_HINT),
    };

    match state.cache.delete(key.as_str()).await {
        Ok(true) => text(StatusCode::OK, "Deleted"),
        Ok(false) => text(StatusCode::NOT_FOUND, "Not Found"),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to delete cache entry");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

fn text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

fn image(data: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        Body::from(data),
    )
        .into_response()
}
