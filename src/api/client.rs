use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiError, FetchTransport};
use crate::config::ApiConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON payload, if any
    pub body: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves a request over the wire. Implementations enforce `request.timeout`.
///
/// Futures are not `Send`: everything runs on the browser's event loop.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Per-call overrides of the client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Replaces the configured base URL; `Some(String::new())` sends the
    /// path relative to the page origin.
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// HTTP client configured once at startup and handed to views through context.
#[derive(Debug, Clone)]
pub struct ApiClient<T = FetchTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<FetchTransport> {
    /// Create a client that talks to the backend through the browser's `fetch`.
    pub const fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, FetchTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub const fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[cfg(test)]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `path` relative to the configured base and decode the JSON body.
    #[allow(clippy::future_not_send)]
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build(HttpMethod::Get, path, None, &RequestOptions::default());
        self.execute(request).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    #[allow(clippy::future_not_send)]
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload =
            serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = self.build(HttpMethod::Post, path, Some(payload), options);
        self.execute(request).await
    }

    fn build(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        options: &RequestOptions,
    ) -> HttpRequest {
        let base = options.base_url.as_deref().unwrap_or(&self.config.base_url);
        HttpRequest {
            method,
            url: resolve_url(base, path),
            body,
            timeout: options.timeout.unwrap_or(self.config.timeout),
        }
    }

    #[allow(clippy::future_not_send)]
    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }
        decode_body(&response.body)
    }
}

/// Join a base URL and a request path the way browser HTTP clients do:
/// absolute paths win, otherwise exactly one `/` separates the two.
pub fn resolve_url(base: &str, path: &str) -> String {
    if base.is_empty() || is_absolute(path) {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}


#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use super::testing::{client, MockTransport};
    use super::*;

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url("/api", "/health"), "/api/health");
        assert_eq!(resolve_url("/api/", "health"), "/api/health");
        assert_eq!(resolve_url("", "/query"), "/query");
        assert_eq!(
            resolve_url("/api", "https://other.example.com/x"),
            "https://other.example.com/x"
        );
        assert_eq!(
            resolve_url("http://localhost:8000", "/health"),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn test_get_uses_configured_base_and_timeout() {
        let api = client(MockTransport::ok_json(r#"{"status":"healthy"}"#));

        let body: Value = block_on(api.get("/health")).unwrap();

        assert_eq!(body, json!({"status": "healthy"}));
        let requests = api.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "/api/health");
        assert_eq!(requests[0].timeout, crate::config::DEFAULT_TIMEOUT);
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn test_post_applies_overrides() {
        let api = client(MockTransport::ok_json("{}"));
        let options = RequestOptions {
            base_url: Some(String::new()),
            timeout: Some(Duration::from_secs(5)),
        };

        let _: Value = block_on(api.post("/query", &json!({"question": "hi"}), &options)).unwrap();

        let requests = api.transport().requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "/query");
        assert_eq!(requests[0].timeout, Duration::from_secs(5));
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"question":"hi"}"#));
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        for status in [400, 404, 500, 502] {
            let api = client(MockTransport::replying([Ok(HttpResponse {
                status,
                body: r#"{"detail":"nope"}"#.into(),
            })]));
            let result: Result<Value, _> = block_on(api.get("/health"));
            assert_eq!(result, Err(ApiError::Status { status }));
        }
    }

    #[test]
    fn test_transport_errors_propagate() {
        let api = client(MockTransport::failing(ApiError::Timeout(
            crate::config::DEFAULT_TIMEOUT,
        )));
        let result: Result<Value, _> = block_on(api.get("/slow"));
        assert_eq!(result, Err(ApiError::Timeout(crate::config::DEFAULT_TIMEOUT)));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let api = client(MockTransport::ok_json(""));
        let body: Value = block_on(api.get("/health")).unwrap();
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let api = client(MockTransport::ok_json("<html>"));
        let result: Result<Value, _> = block_on(api.get("/health"));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    proptest! {
        #[test]
        fn test_resolved_url_has_single_separator(
            base in "/[a-z]{1,8}/{0,2}",
            path in "/{0,2}[a-z]{1,8}"
        ) {
            let url = resolve_url(&base, &path);
            prop_assert!(!url.contains("//"));
            prop_assert!(url.starts_with(base.trim_end_matches('/')));
            prop_assert!(url.ends_with(path.trim_start_matches('/')));
        }
    }
}
