use leptos::prelude::*;
use leptos_router::components::A;

/// Header navigation between the Home and Ask pages.
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="nav">
            <span class="brand">"RAG Ask"</span>
            <A href="/">"Home"</A>
            <A href="/ask">"Ask"</A>
        </nav>
    }
}
