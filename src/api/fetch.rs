use std::pin::pin;
use std::time::Duration;

use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;

use crate::api::client::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::api::ApiError;

/// [`Transport`] backed by the browser `fetch` API.
///
/// The request is aborted through an `AbortController` once its timeout
/// elapses; otherwise in-flight requests always run to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    #[allow(clippy::future_not_send)]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let controller = web_sys::AbortController::new()
            .map_err(|e| ApiError::Network(format!("AbortController unavailable: {e:?}")))?;
        let signal = controller.signal();

        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        }
        .abort_signal(Some(&signal));

        let outgoing = build_request(builder, request.body).map_err(|e| {
            web_sys::console::error_1(&format!("Failed to build request: {e}").into());
            ApiError::Network(e.to_string())
        })?;

        let exchange = pin!(async move {
            let response = outgoing.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, gloo_net::Error>(HttpResponse { status, body })
        });
        let timer = TimeoutFuture::new(timer_millis(request.timeout));

        match future::select(exchange, timer).await {
            Either::Left((Ok(response), _)) => Ok(response),
            Either::Left((Err(e), _)) => {
                web_sys::console::error_1(
                    &format!("Request to {} failed: {e}", request.url).into(),
                );
                Err(ApiError::Network(e.to_string()))
            }
            Either::Right(((), _)) => {
                controller.abort();
                web_sys::console::warn_1(
                    &format!(
                        "Request to {} timed out after {}ms",
                        request.url,
                        request.timeout.as_millis()
                    )
                    .into(),
                );
                Err(ApiError::Timeout(request.timeout))
            }
        }
    }
}

/// Delay for `setTimeout`, which takes a signed 32-bit millisecond count.
/// Longer timeouts are clamped to the largest delay the browser honours.
fn timer_millis(timeout: Duration) -> u32 {
    i32::try_from(timeout.as_millis()).map_or(i32::MAX.unsigned_abs(), i32::unsigned_abs)
}

fn build_request(builder: RequestBuilder, body: Option<String>) -> Result<Request, gloo_net::Error> {
    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json),
        None => builder.build(),
    }
}
