//! Sign-in / sign-up page backed by the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Visitors who already hold a session are sent home. Input is checked
//! locally before any provider call; provider rejections (bad password,
//! existing account) are shown verbatim.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::routes::AppRoute;
use crate::state::toast::ToastState;
use crate::util::gate::use_session_watch;
use crate::util::notify;

/// Minimum password length accepted by the identity provider.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Welcome Back",
            Self::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::SignUp => "Sign Up",
        }
    }

    #[must_use]
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? Sign up",
            Self::SignUp => "Already have an account? Login",
        }
    }
}

/// Trimmed credentials that passed local checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Check the form locally. `full_name` is only required for sign-up.
///
/// # Errors
///
/// The message to show for the first problem found.
pub fn validate_credentials(
    mode: AuthMode,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Credentials, &'static str> {
    let email = email.trim();
    let full_name = full_name.trim();
    if mode == AuthMode::SignUp && full_name.is_empty() {
        return Err("Please enter your full name");
    }
    if email.is_empty() {
        return Err("Please enter your email");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned(), full_name: full_name.to_owned() })
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let session = use_session_watch();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let navigate_home = navigate.clone();
    Effect::new(move || {
        if session.with(Option::is_some) {
            navigate_home(AppRoute::Home.path(), NavigateOptions::default());
        }
    });

    #[cfg(feature = "hydrate")]
    let (store, provider) =
        (expect_context::<crate::state::session::SessionStore>(), expect_context::<crate::net::backend::BackendClient>());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let creds = match validate_credentials(
            current,
            &email.get_untracked(),
            &password.get_untracked(),
            &full_name.get_untracked(),
        ) {
            Ok(creds) => creds,
            Err(message) => {
                notify::error(toasts, message);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::services::auth::{self, SignUpOutcome};

            let store = store.clone();
            let provider = provider.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match current {
                    AuthMode::SignIn => match auth::sign_in(&provider, &store, &creds.email, &creds.password).await {
                        Ok(_) => {
                            notify::success(toasts, "Logged in successfully!");
                            navigate(AppRoute::Home.path(), NavigateOptions::default());
                        }
                        Err(e) => notify::error(toasts, e.to_string()),
                    },
                    AuthMode::SignUp => {
                        match auth::sign_up(&provider, &store, &creds.email, &creds.password, &creds.full_name).await {
                            Ok(outcome) => {
                                notify::success(toasts, outcome.message());
                                if outcome == SignUpOutcome::SignedIn {
                                    navigate(AppRoute::Home.path(), NavigateOptions::default());
                                } else {
                                    mode.set(AuthMode::SignIn);
                                    password.set(String::new());
                                }
                            }
                            Err(e) => notify::error(toasts, e.to_string()),
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (creds, &navigate);
            busy.set(false);
        }
    };

    let is_sign_up = move || mode.get() == AuthMode::SignUp;

    view! {
        <section class="page page--auth">
            <form class="card auth-card" on:submit=on_submit>
                <div class="auth-card__brand">"🌿"</div>
                <h1>{move || mode.get().title()}</h1>
                <p class="muted">"Krishi Mithra AI: smart tools for every farmer"</p>

                <Show when=is_sign_up>
                    <div class="field">
                        <label for="full-name">"Full Name"</label>
                        <input
                            id="full-name"
                            type="text"
                            placeholder="Your name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </div>
                </Show>
                <div class="field">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        autocomplete="email"
                        placeholder="farmer@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </div>
                <div class="field">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        autocomplete=move || if is_sign_up() { "new-password" } else { "current-password" }
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>

                <button class="btn btn--primary btn--block" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Please wait..." } else { mode.get().submit_label() }}
                </button>
                <button
                    class="btn btn--link"
                    type="button"
                    on:click=move |_| mode.update(|m| *m = m.toggled())
                >
                    {move || mode.get().toggle_prompt()}
                </button>
            </form>
        </section>
    }
}
