//! Crop recommendation from soil nutrients and weather.

use advisory::CropParams;
use leptos::prelude::*;

use crate::net::inference::HttpInference;
use crate::pages::form::{CROP_FIELDS, render_fields, spawn_request};
use crate::state::request::RequestState;
use crate::state::toast::ToastState;

#[component]
pub fn CropRecommendPage() -> impl IntoView {
    let api = expect_context::<HttpInference>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let params = RwSignal::new(CropParams::default());
    let request = RwSignal::new(RequestState::<String>::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        let body = params.get_untracked();
        spawn_request(request, toasts, "Recommendation received!", async move {
            advisory::recommend_crop(&api, &body).await
        });
    };
    let loading = move || request.with(|r| r.loading);

    view! {
        <section class="page page--narrow">
            <header class="page__header">
                <h1>"Crop Recommender"</h1>
                <p class="muted">"Enter your soil and weather conditions to get a crop recommendation."</p>
            </header>

            <form class="card" on:submit=on_submit>
                <h2>"Enter Environmental Data"</h2>
                <p class="muted">"Provide the following metrics for an accurate recommendation."</p>
                <div class="field-grid">{render_fields(&CROP_FIELDS, params)}</div>
                <button class="btn btn--primary btn--block" type="submit" disabled=loading>
                    {move || if loading() { "Getting Recommendation..." } else { "Get Recommendation" }}
                </button>
            </form>

            {move || request.with(|r| r.result.clone()).map(|crop| view! {
                <div class="card card--result">
                    <h2 class="accent">"Recommendation Result"</h2>
                    <div class="result">
                        <h3>"Recommended Crop"</h3>
                        <p class="result__title">{crop}</p>
                    </div>
                    <p class="muted small">
                        "This recommendation is based on the provided environmental data. For best results, consult with a local agricultural expert."
                    </p>
                    <button
                        class="btn btn--outline"
                        on:click=move |_| {
                            request.update(RequestState::reset);
                            params.set(CropParams::default());
                        }
                    >
                        "Get Another Recommendation"
                    </button>
                </div>
            })}
        </section>
    }
}
