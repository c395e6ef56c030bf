use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::server::AppState;

/// Largest request body forwarded upstream.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy target must be an http(s) origin, got {0:?}")]
    InvalidTarget(String),
    #[error("proxy prefix must name a path below the root, got {0:?}")]
    InvalidPrefix(String),
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidTarget(_) | Self::InvalidPrefix(_) | Self::Upstream(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Normalize a proxy prefix to `/segment[/segment...]`.
pub fn normalize_prefix(raw: &str) -> Result<String, ProxyError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains("//") || trimmed.contains(['{', '}', '*']) {
        return Err(ProxyError::InvalidPrefix(raw.to_string()));
    }
    Ok(format!("/{trimmed}"))
}

/// Upstream URL for an incoming path and query, unchanged apart from the origin.
pub fn upstream_url(origin: &str, path_and_query: &str) -> String {
    format!("{origin}{path_and_query}")
}

/// Forward one request to the backend and relay its response.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), ToString::to_string);
    let url = upstream_url(&state.target, &path_and_query);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!(method = %parts.method, %url, bytes = body.len(), "forwarding request");

    let upstream = state
        .client
        .request(parts.method.clone(), &url)
        .headers(forwardable_headers(&parts.headers, true))
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(%url, "upstream request failed: {e}");
            ProxyError::Upstream(e)
        })?;

    let status = upstream.status();
    let headers = forwardable_headers(upstream.headers(), false);
    let bytes = upstream.bytes().await?;

    tracing::info!(method = %parts.method, %url, status = status.as_u16(), "proxied");

    Ok((status, headers, Body::from(bytes)).into_response())
}

/// Copy `headers` minus hop-by-hop entries, including any header the
/// `Connection` value names. Requests also drop `host`, so the upstream
/// sees its own origin, and `content-length`, which is recomputed from the
/// buffered body.
fn forwardable_headers(headers: &HeaderMap, outgoing: bool) -> HeaderMap {
    let named = connection_tokens(headers);
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name) && !named.iter().any(|t| t == name.as_str()))
        .filter(|(name, _)| {
            !(outgoing && (**name == header::HOST || **name == header::CONTENT_LENGTH))
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Lowercased header names listed in every `Connection` value.
fn connection_tokens(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Headers that describe a single connection and must not be relayed.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    [
        header::CONNECTION,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
        header::TE,
        header::TRAILER,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
    ]
    .contains(name)
        || matches!(name.as_str(), "keep-alive" | "proxy-connection")
}
