mod api;
mod app;
mod components;
mod config;
mod hooks;
mod models;
mod pages;

use app::App;
use leptos::prelude::*;

fn main() {
    // Route panics to the browser console
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(|| view! { <App /> });
}
