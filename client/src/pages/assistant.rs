//! AI farming assistant: one question in, one markdown answer out.

use leptos::prelude::*;

use crate::components::gate_notice::GateNotice;
use crate::net::inference::HttpInference;
use crate::pages::form::spawn_request;
use crate::routes::AppRoute;
use crate::state::request::RequestState;
use crate::state::toast::ToastState;
use crate::util::gate::{GateStatus, gate_status, use_session_gate};
use crate::util::markdown::render_markdown_html;

#[component]
pub fn AssistantPage() -> impl IntoView {
    let gate = use_session_gate(AppRoute::Assistant);
    let api = expect_context::<HttpInference>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let question = RwSignal::new(String::new());
    let request = RwSignal::new(RequestState::<String>::default());

    let on_ask = Callback::new(move |()| {
        let api = api.clone();
        let text = question.get_untracked();
        spawn_request(request, toasts, "Received answer from assistant!", async move {
            advisory::ask_assistant(&api, &text).await
        });
    });

    let on_again = move |_| {
        request.update(RequestState::reset);
        question.set(String::new());
    };

    let granted = move || gate_status(&gate.get()) == GateStatus::Granted;
    let loading = move || request.with(|r| r.loading);

    view! {
        <Show when=granted fallback=move || view! { <GateNotice state=gate/> }>
            <section class="page page--narrow">
                <header class="page__header">
                    <h1>"AI Agricultural Assistant"</h1>
                    <p class="muted">"Ask any question related to farming, crops, and soil."</p>
                </header>

                <form
                    class="card"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_ask.run(());
                    }
                >
                    <h2>"Ask a Question"</h2>
                    <textarea
                        class="textarea"
                        rows="4"
                        placeholder="e.g., What are the best crops to grow in sandy soil?"
                        prop:value=move || question.get()
                        on:input=move |ev| question.set(event_target_value(&ev))
                        disabled=loading
                    ></textarea>
                    <button class="btn btn--primary btn--block" type="submit" disabled=loading>
                        {move || if loading() { "Thinking..." } else { "Ask Assistant" }}
                    </button>
                </form>

                {move || request.with(|r| r.result.clone()).map(|answer| view! {
                    <div class="card card--result">
                        <h2 class="accent">"Assistant's Answer"</h2>
                        <div class="markdown" inner_html=render_markdown_html(&answer)></div>
                        <button class="btn btn--outline" on:click=on_again>"Ask Another Question"</button>
                    </div>
                })}
            </section>
        </Show>
    }
}
