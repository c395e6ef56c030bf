use leptos::prelude::*;
use serde_json::Value;

use crate::api::{HealthStatus, HEALTH_PATH};
use crate::config::BUILD_TIME;
use crate::hooks::{use_api, FetchState};

/// Landing page showing the backend health check.
#[component]
pub fn Home() -> impl IntoView {
    let health = use_api::<Value>(Signal::derive(|| HEALTH_PATH.to_string()));

    view! {
        <div class="page home">
            <h1>"Architecture Assistant"</h1>
            <p>"Build time: " {BUILD_TIME}</p>

            <section class="health">
                <h2>"Backend Health"</h2>
                {move || health.with(render_health)}
            </section>
        </div>
    }
}

fn render_health(state: &FetchState<Value>) -> AnyView {
    if state.error.is_empty() {
        let status = health_label(state);
        view! {
            <p>
                "Backend says: " <strong>{status}</strong>
            </p>
        }
        .into_any()
    } else {
        let error = format!("Error: {}", state.error);
        view! { <p class="error">{error}</p> }.into_any()
    }
}

/// Status text for the health line; `...` until a non-empty status arrives.
fn health_label(state: &FetchState<Value>) -> String {
    state
        .data
        .as_ref()
        .map(|body| HealthStatus::from_body(body).as_str().to_string())
        .filter(|status| !status.is_empty())
        .unwrap_or_else(|| "...".to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_label_while_loading() {
        assert_eq!(health_label(&FetchState::pending()), "...");
    }

    #[test]
    fn test_label_defaults_to_ok_without_status() {
        let mut state = FetchState::pending();
        state.settle(Ok(json!({"version": "1.2"})));
        assert_eq!(health_label(&state), "OK");
    }

    #[test]
    fn test_label_shows_reported_status() {
        let mut state = FetchState::pending();
        state.settle(Ok(json!({"status": "degraded"})));
        assert_eq!(health_label(&state), "degraded");

        state.settle(Ok(json!({"status": ""})));
        assert_eq!(health_label(&state), "...");
    }

    #[test]
    fn test_failure_leaves_no_label() {
        let mut state = FetchState::pending();
        state.settle(Err(ApiError::Network("refused".into())));
        assert_eq!(state.error, "Network Error");
        assert_eq!(health_label(&state), "...");
    }
}
