//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the process-wide collaborators and injects them as context:
//! the build-time [`ClientConfig`], the [`SessionStore`], the identity
//! [`BackendClient`], the [`HttpInference`] client and the toast queue.
//! Pages never construct their own clients.
//!
//! The session is restored from `localStorage` on hydration and written back
//! on every change, so a reload keeps the user signed in.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{footer::Footer, navbar::Navbar, toaster::Toaster};
use crate::config::ClientConfig;
use crate::net::backend::BackendClient;
use crate::net::inference::HttpInference;
use crate::net::types::Session;
use crate::pages::{
    about::AboutPage, assistant::AssistantPage, auth::AuthPage, crop_recommend::CropRecommendPage,
    detection::DetectionPage, fertilizer::FertilizerPage, home::HomePage, not_found::NotFoundPage,
    profile::ProfilePage,
};
use crate::routes::AppRoute;
use crate::state::session::{AuthChangeEvent, SessionStore};
use crate::state::toast::ToastState;
use crate::util::storage;

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "krishi_mithra_session";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="AI crop disease detection and farming advice"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Write the session through to storage on every change.
fn persist_session(event: AuthChangeEvent, session: Option<&Session>) {
    match session {
        Some(session) => storage::save_json(SESSION_STORAGE_KEY, session),
        None => storage::remove(SESSION_STORAGE_KEY),
    }
    log::debug!("session {event:?}; signed_in={}", session.is_some());
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    if !config.identity_configured() {
        log::warn!("identity provider not configured; login is disabled");
    }

    let store = SessionStore::default();
    let persistence = store.subscribe(persist_session);
    on_cleanup(move || drop(persistence));
    if let Some(restored) = storage::load_json::<Session>(SESSION_STORAGE_KEY) {
        store.publish(AuthChangeEvent::InitialSession, Some(restored));
    }

    provide_context(BackendClient::from_config(&config));
    provide_context(HttpInference::from_config(&config));
    provide_context(config);
    provide_context(store);
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/krishi-mithra.css"/>
        <Title text="Krishi Mithra AI"/>

        <Router>
            <Navbar/>
            <main class="main">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment(AppRoute::Home.segment()) view=HomePage/>
                    <Route path=StaticSegment(AppRoute::Auth.segment()) view=AuthPage/>
                    <Route path=StaticSegment(AppRoute::Profile.segment()) view=ProfilePage/>
                    <Route path=StaticSegment(AppRoute::Detection.segment()) view=DetectionPage/>
                    <Route path=StaticSegment(AppRoute::About.segment()) view=AboutPage/>
                    <Route path=StaticSegment(AppRoute::Assistant.segment()) view=AssistantPage/>
                    <Route path=StaticSegment(AppRoute::CropRecommend.segment()) view=CropRecommendPage/>
                    <Route path=StaticSegment(AppRoute::Fertilizer.segment()) view=FertilizerPage/>
                </Routes>
            </main>
            <Footer/>
            <Toaster/>
        </Router>
    }
}
