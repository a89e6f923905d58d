//! Crop disease detection from a leaf photo.
//!
//! SYSTEM CONTEXT
//! ==============
//! Gated view. The picked file is read into memory once and kept with an
//! object-URL preview. "Analyze Image" re-checks the session cache before
//! submitting and then runs the detection workflow, which refreshes an
//! expired token and logs the result to the user's history.

use advisory::{Diagnosis, ImageUpload};
use leptos::prelude::*;

use crate::components::gate_notice::GateNotice;
use crate::net::backend::BackendClient;
use crate::net::inference::{HttpInference, revoke_preview};
use crate::pages::form::spawn_request;
use crate::routes::AppRoute;
use crate::services::detection::{DetectionOutcome, analyze_for_current_user};
use crate::state::request::RequestState;
use crate::state::session::SessionStore;
use crate::state::toast::ToastState;
use crate::util::gate::{GateStatus, gate_status, use_session_gate};
use crate::util::markdown::render_markdown_html;
use crate::util::{notify, time};

#[component]
pub fn DetectionPage() -> impl IntoView {
    let gate = use_session_gate(AppRoute::Detection);
    let api = expect_context::<HttpInference>();
    let backend = expect_context::<BackendClient>();
    let store = expect_context::<SessionStore>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let image = RwSignal::new(None::<ImageUpload>);
    let preview = RwSignal::new(None::<String>);
    let request = RwSignal::new(RequestState::<DetectionOutcome>::default());

    on_cleanup(move || {
        if let Some(url) = preview.try_get_untracked().flatten() {
            revoke_preview(&url);
        }
    });

    let on_pick = Callback::new(move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            if let Some(old) = preview.get_untracked() {
                revoke_preview(&old);
            }
            preview.set(crate::net::inference::preview_url(&file));
            request.update(RequestState::reset);
            leptos::task::spawn_local(async move {
                match crate::net::inference::read_image_file(&file).await {
                    Ok(upload) => image.set(Some(upload)),
                    Err(e) => {
                        image.set(None);
                        notify::error(toasts, e);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    });

    let on_analyze = Callback::new(move |()| {
        if !store.is_signed_in() {
            notify::error(toasts, AppRoute::Detection.denied_notice().unwrap_or_default());
            return;
        }
        let api = api.clone();
        let backend = backend.clone();
        let store = store.clone();
        let upload = image.get_untracked();
        spawn_request(request, toasts, "Analysis complete!", async move {
            analyze_for_current_user(&api, &backend, &store, upload.as_ref(), time::now_secs()).await
        });
    });

    let on_again = move |_| {
        request.update(RequestState::reset);
        image.set(None);
        if let Some(url) = preview.get_untracked() {
            revoke_preview(&url);
        }
        preview.set(None);
    };

    let granted = move || gate_status(&gate.get()) == GateStatus::Granted;
    let loading = move || request.with(|r| r.loading);
    let show_analyze = move || preview.with(Option::is_some) && !request.with(RequestState::has_result);

    view! {
        <Show when=granted fallback=move || view! { <GateNotice state=gate/> }>
            <section class="page page--narrow">
                <header class="page__header">
                    <h1>"Crop Disease Detection"</h1>
                    <p class="muted">"Upload an image of your crop leaf to detect diseases"</p>
                </header>

                <div class="card">
                    <h2>"Upload Crop Image"</h2>
                    <p class="muted">"Take a clear photo of the affected leaf for accurate detection"</p>
                    <label class="upload" for="image-upload">
                        <input
                            id="image-upload"
                            class="upload__input"
                            type="file"
                            accept="image/*"
                            on:change=move |ev| on_pick.run(ev)
                        />
                        {move || match preview.get() {
                            Some(url) => view! { <img class="upload__preview" src=url alt="Uploaded crop"/> }.into_any(),
                            None => view! { <span class="upload__icon">"⬆"</span> }.into_any(),
                        }}
                        <p>{move || if preview.with(Option::is_some) { "Change Image" } else { "Click to upload" }}</p>
                        <p class="muted small">"PNG, JPG or JPEG (max 5MB)"</p>
                    </label>

                    <Show when=show_analyze>
                        <button
                            class="btn btn--primary btn--block"
                            disabled=loading
                            on:click=move |_| on_analyze.run(())
                        >
                            {move || if loading() { "Analyzing..." } else { "Analyze Image" }}
                        </button>
                    </Show>
                </div>

                {move || request.with(|r| r.result.clone()).map(|outcome| view! {
                    <DiagnosisCard diagnosis=outcome.diagnosis/>
                    <button class="btn btn--outline btn--block" on:click=on_again>"Analyze Another Image"</button>
                })}
            </section>
        </Show>
    }
}

#[component]
fn DiagnosisCard(diagnosis: Diagnosis) -> impl IntoView {
    let advisory_html = diagnosis.advisory.as_deref().map(render_markdown_html);
    let confidence = diagnosis.confidence_label();

    view! {
        <div class="card card--result">
            <h2 class="accent">"✔ Detection Result"</h2>
            <p class="muted">"Analysis completed with " {confidence.clone()} " confidence"</p>

            <div class="result result--alert">
                <h3>"Detected Disease"</h3>
                <p class="result__title">{diagnosis.disease}</p>
                <div class="result__meta">
                    <span>"Confidence: " <strong>{confidence}</strong></span>
                    <span>"Severity: " <strong>{diagnosis.severity}</strong></span>
                </div>
            </div>

            <div class="result">
                <h3>"Description"</h3>
                <p>{diagnosis.description}</p>
            </div>

            <div class="result">
                <h3>"Recommended Remedies"</h3>
                <ul>{diagnosis.remedies.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}</ul>
            </div>

            <div class="result">
                <h3>"Prevention Tips"</h3>
                <ul>{diagnosis.prevention.into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}</ul>
            </div>

            {advisory_html.map(|html| view! {
                <div class="result">
                    <h3>"Expert Advisory"</h3>
                    <div class="markdown" inner_html=html></div>
                </div>
            })}
        </div>
    }
}
