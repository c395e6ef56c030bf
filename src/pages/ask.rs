use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ask_question, ApiClient};
use crate::models::{AskForm, SourceLink};

/// Question form with the answer and its citations.
#[component]
pub fn Ask() -> impl IntoView {
    let client = use_context::<ApiClient>().expect("ApiClient context missing");
    let form = RwSignal::new(AskForm::default());

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        form.update(|f| f.input = value);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit_question(client.clone(), form);
    };

    let on_clear = move |_| form.update(AskForm::clear);

    view! {
        <div class="page ask">
            <h1>"Ask the Architecture Assistant"</h1>
            <form class="ask-form" on:submit=on_submit>
                <label for="q">"Your question"</label>
                <textarea
                    id="q"
                    rows="4"
                    required=true
                    placeholder="Type an Azure architecture question…"
                    prop:value=move || form.with(|f| f.input.clone())
                    on:input=on_input
                ></textarea>
                <div class="actions">
                    <button type="submit" prop:disabled=move || !form.with(AskForm::can_submit)>
                        {move || form.with(AskForm::submit_label)}
                    </button>
                    <button type="button" on:click=on_clear>
                        "Clear"
                    </button>
                </div>
            </form>

            {move || {
                form.with(AskForm::error_line)
                    .map(|line| view! { <p class="error">{line}</p> })
            }}

            {move || {
                form.with(|f| f.answer_text().map(str::to_string))
                    .map(|answer| {
                        view! {
                            <section class="answer">
                                <h2>"Answer"</h2>
                                <div class="answer-body">
                                    <pre>{answer}</pre>
                                </div>
                            </section>
                        }
                    })
            }}

            {move || {
                let links = form.with(AskForm::source_links);
                (!links.is_empty()).then(|| view! { <SourceList links=links /> })
            }}
        </div>
    }
}

#[component]
fn SourceList(links: Vec<SourceLink>) -> impl IntoView {
    view! {
        <section class="sources">
            <h3>"Sources"</h3>
            <ul>
                {links
                    .into_iter()
                    .map(|link| {
                        view! {
                            <li>
                                <a href=link.href target="_blank" rel="noreferrer">
                                    {link.label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

/// Send the current question, if any, and record the outcome in `form`.
fn submit_question(client: ApiClient, form: RwSignal<AskForm>) {
    let Some(question) = form.try_update(AskForm::begin_submit).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = ask_question(&client, &question).await;
        if let Err(e) = &result {
            web_sys::console::error_1(&format!("Ask request failed: {e:?}").into());
        }
        // The page may have been left while the request was in flight.
        form.try_update(|f| f.finish(result));
    });
}
