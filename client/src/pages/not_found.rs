//! Fallback for paths the router does not serve.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::routes::AppRoute;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let pathname = use_location().pathname;
    Effect::new(move || log::warn!("404: no route for {}", pathname.get_untracked()));

    view! {
        <section class="page page--center">
            <h1 class="display">"404"</h1>
            <p class="muted">"Oops! Page not found"</p>
            <a class="btn btn--primary" href=AppRoute::Home.path()>"Return to Home"</a>
        </section>
    }
}
