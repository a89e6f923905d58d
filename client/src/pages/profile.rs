//! Signed-in user's profile: display name edit, account details, logout.

use leptos::prelude::*;

use crate::components::gate_notice::GateNotice;
use crate::components::navbar::use_logout;
use crate::routes::AppRoute;
use crate::state::toast::ToastState;
use crate::util::gate::{GateStatus, gate_status, use_session_gate};
use crate::util::time::member_since;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let gate = use_session_gate(AppRoute::Profile);
    let toasts = expect_context::<RwSignal<ToastState>>();
    let logout = use_logout();

    let full_name = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    // Seed the name input once the session resolves.
    Effect::new(move || {
        if let Some(name) = gate.with(|s| s.session.as_ref().and_then(|s| s.user.user_metadata.full_name.clone())) {
            full_name.set(name);
        }
    });

    #[cfg(feature = "hydrate")]
    let (store, provider) =
        (expect_context::<crate::state::session::SessionStore>(), expect_context::<crate::net::backend::BackendClient>());

    let on_save = Callback::new(move |()| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::services::auth;
            use crate::util::notify;

            let store = store.clone();
            let provider = provider.clone();
            let name = full_name.get_untracked();
            leptos::task::spawn_local(async move {
                match auth::update_profile(&provider, &store, &name).await {
                    Ok(_) => notify::success(toasts, "Profile updated successfully"),
                    Err(e) => notify::error(toasts, e.to_string()),
                }
                saving.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = toasts;
            saving.set(false);
        }
    });

    let granted = move || gate_status(&gate.get()) == GateStatus::Granted;
    let email = move || gate.with(|s| s.session.as_ref().and_then(|s| s.user.email.clone()).unwrap_or_default());
    let joined = move || {
        gate.with(|s| member_since(s.session.as_ref().and_then(|s| s.user.created_at.as_deref())))
            .unwrap_or_else(|| "N/A".to_owned())
    };

    view! {
        <Show when=granted fallback=move || view! { <GateNotice state=gate/> }>
            <section class="page page--narrow">
                <header class="page__header">
                    <h1>"My Profile"</h1>
                    <p class="muted">"Manage your account information"</p>
                </header>

                <div class="card">
                    <div class="card__header">
                        <h2>"Account Details"</h2>
                        <button class="btn btn--outline" on:click=move |_| logout.run(())>"Logout"</button>
                    </div>
                    <div class="avatar">"👤"</div>

                    <div class="field">
                        <label for="full-name">"Full Name"</label>
                        <input
                            id="full-name"
                            type="text"
                            placeholder="Enter your full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="field">
                        <label for="email">"Email Address"</label>
                        <input id="email" type="email" prop:value=email disabled=true/>
                    </div>
                    <div class="field">
                        <label>"Member Since"</label>
                        <p>{joined}</p>
                    </div>

                    <button
                        class="btn btn--primary btn--block"
                        disabled=move || saving.get()
                        on:click=move |_| on_save.run(())
                    >
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </section>
        </Show>
    }
}
