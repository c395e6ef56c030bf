use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page not-found">
            <h1>"Page Not Found"</h1>
            <A href="/">"Back to Home"</A>
        </div>
    }
}
