//! Top navigation bar with session-aware account actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Links come from `AppRoute::NAV`, the same table the router is built
//! from. The account area follows the session store through
//! `use_session_watch`, so logging in or out anywhere updates it.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::routes::AppRoute;
use crate::state::toast::ToastState;
use crate::util::gate::use_session_watch;

/// Build the logout action for the current view.
///
/// On success: clears the session, shows a success toast and navigates home.
/// On failure: shows the provider's message and stays put.
pub fn use_logout() -> Callback<()> {
    let toasts = expect_context::<RwSignal<ToastState>>();

    #[cfg(feature = "hydrate")]
    let (store, provider, navigate) = (
        expect_context::<crate::state::session::SessionStore>(),
        expect_context::<crate::net::backend::BackendClient>(),
        leptos_router::hooks::use_navigate(),
    );

    Callback::new(move |()| {
        #[cfg(feature = "hydrate")]
        {
            use crate::services::auth;
            use crate::util::notify;

            let store = store.clone();
            let provider = provider.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match auth::sign_out(&provider, &store).await {
                    Ok(()) => {
                        notify::success(toasts, "Logged out successfully");
                        navigate(AppRoute::Home.path(), leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("logout failed: {e}");
                        notify::error(toasts, e.to_string());
                    }
                }
            });
        }

        #[cfg(not(feature = "hydrate"))]
        let _ = toasts;
    })
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session_watch();
    let logout = use_logout();
    let pathname = use_location().pathname;
    let menu_open = RwSignal::new(false);

    let signed_in = move || session.with(Option::is_some);
    let greeting = move || session.with(|s| s.as_ref().map(|s| s.user.display_name()).unwrap_or_default());

    let links = AppRoute::NAV
        .into_iter()
        .map(|route| {
            view! {
                <a
                    class="navbar__link"
                    class:navbar__link--active=move || pathname.get() == route.path()
                    href=route.path()
                    on:click=move |_| menu_open.set(false)
                >
                    {route.label()}
                </a>
            }
        })
        .collect_view();

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href=AppRoute::Home.path()>
                <span class="navbar__logo">"🌿"</span>
                <span>"Krishi Mithra AI"</span>
            </a>

            <button
                class="navbar__toggle"
                aria-label="Toggle menu"
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                {move || if menu_open.get() { "✕" } else { "☰" }}
            </button>

            <div class="navbar__links" class:navbar__links--open=move || menu_open.get()>
                {links}
            </div>

            <div class="navbar__account" class:navbar__account--open=move || menu_open.get()>
                <span class="navbar__greeting" class:hidden=move || !signed_in()>{greeting}</span>
                <a
                    class="btn btn--ghost"
                    class:hidden=move || !signed_in()
                    href=AppRoute::Profile.path()
                    on:click=move |_| menu_open.set(false)
                >
                    "Profile"
                </a>
                <button
                    class="btn btn--outline"
                    class:hidden=move || !signed_in()
                    on:click=move |_| {
                        menu_open.set(false);
                        logout.run(());
                    }
                >
                    "Logout"
                </button>
                <a
                    class="btn btn--primary"
                    class:hidden=signed_in
                    href=AppRoute::Auth.path()
                    on:click=move |_| menu_open.set(false)
                >
                    "Login / Sign Up"
                </a>
            </div>
        </nav>
    }
}
