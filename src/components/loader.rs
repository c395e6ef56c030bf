use leptos::prelude::*;

/// Label shown when no other text is given.
pub const DEFAULT_LABEL: &str = "Loading...";

/// Busy indicator announced to assistive technology.
#[component]
pub fn Loader(#[prop(into, default = String::from(DEFAULT_LABEL))] label: String) -> impl IntoView {
    view! {
        <div class="loader">
            <span aria-busy="true" aria-live="polite">
                {label}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        assert_eq!(DEFAULT_LABEL, "Loading...");
    }
}
