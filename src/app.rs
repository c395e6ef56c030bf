use leptos::prelude::*;
use leptos::tachys::dom::window;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;
use crate::components::{Loader, Nav};
use crate::config::{ApiConfig, ShellVariant};
use crate::pages::{Ask, Home, NotFound};

/// How long the startup gate shows its loader before mounting Home, in ms.
const STARTUP_DELAY_MS: i32 = 150;

/// Loader text while the startup gate is closed.
const STARTUP_LABEL: &str = "Starting app...";

/// Root application component that provides the API client and mounts the shell.
#[component]
pub fn App() -> impl IntoView {
    let client = ApiClient::new(ApiConfig::from_build_env());

    // Provide the client to all pages
    provide_context(client);

    view! {
        <main class="app">
            {match ShellVariant::from_build_env() {
                ShellVariant::Router => view! { <RoutedShell /> }.into_any(),
                ShellVariant::StartupGate => view! { <StartupGate /> }.into_any(),
            }}
        </main>
    }
}

/// Navigation bar with the Home and Ask routes.
#[component]
fn RoutedShell() -> impl IntoView {
    view! {
        <Router>
            <Nav />
            <Routes fallback=NotFound>
                <Route path=path!("/") view=Home />
                <Route path=path!("/ask") view=Ask />
            </Routes>
        </Router>
    }
}

/// Shows a loader for a short fixed delay, then Home.
#[component]
fn StartupGate() -> impl IntoView {
    let ready = RwSignal::new(false);

    let callback: Closure<dyn FnMut()> = Closure::new(move || ready.set(true));
    match window().set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        STARTUP_DELAY_MS,
    ) {
        Ok(handle) => {
            // Keep the closure alive until the timer fires
            callback.forget();
            on_cleanup(move || window().clear_timeout_with_handle(handle));
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Startup timer unavailable: {e:?}").into());
            ready.set(true);
        }
    }

    view! {
        <Show when=move || ready.get() fallback=|| view! { <Loader label=STARTUP_LABEL /> }>
            <Home />
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::loader::DEFAULT_LABEL;

    #[test]
    fn test_startup_gate_timing_and_label() {
        assert_eq!(STARTUP_DELAY_MS, 150);
        assert_eq!(STARTUP_LABEL, "Starting app...");
        assert_ne!(STARTUP_LABEL, DEFAULT_LABEL);
    }

    #[test]
    fn test_router_is_the_default_shell() {
        assert_eq!(ShellVariant::default(), ShellVariant::Router);
        assert_eq!(ShellVariant::parse(Some("gate")), ShellVariant::StartupGate);
    }
}
