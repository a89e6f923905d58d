//! Session Gate for views that require a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Detection, the AI Assistant and Profile call [`use_session_gate`] when they
//! mount. The gate gives the view a local copy of the session that starts as
//! "resolving", so the protected body is never rendered before the session
//! is known.
//!
//! DESIGN
//! ======
//! The change listener is registered before the initial snapshot is
//! requested, so a login or logout that lands while the snapshot is in
//! flight is not lost. The subscription is owned by the view's cleanup and
//! is released however the view exits.
//!
//! Only the initial snapshot redirects. A session that disappears later just
//! updates the local state, which hides the protected body; the view decides
//! what to do before its next privileged action.
//!
//! [`attach_session_listener`] and [`resolve_gate`] hold the whole sequence;
//! [`use_session_gate`] only adds the browser task and the navigation.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use leptos::prelude::*;

use crate::net::backend::{IdentityError, IdentityProvider};
use crate::net::types::Session;
use crate::routes::AppRoute;
use crate::services::auth;
use crate::state::session::{SessionState, SessionStore};
use crate::state::toast::ToastState;
use crate::util::notify;

/// What a gated view should show for its current local state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateStatus {
    Resolving,
    Granted,
    Denied,
}

impl GateStatus {
    /// Only an unresolved session gets a placeholder; a denied visitor is
    /// being redirected and sees nothing.
    #[must_use]
    pub fn shows_spinner(self) -> bool {
        self == Self::Resolving
    }
}

#[must_use]
pub fn gate_status(state: &SessionState) -> GateStatus {
    match (state.loading, state.session.is_some()) {
        (true, _) => GateStatus::Resolving,
        (false, true) => GateStatus::Granted,
        (false, false) => GateStatus::Denied,
    }
}

/// Decision taken once the initial snapshot resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Render(Session),
    Redirect { to: AppRoute, notice: String },
}

/// Map the initial snapshot for `route` to render-or-redirect.
///
/// A snapshot error is treated like an absent session, with the error text
/// appended to the notice.
#[must_use]
pub fn resolve_snapshot(route: AppRoute, snapshot: Result<Option<Session>, IdentityError>) -> GateOutcome {
    let notice = route.denied_notice().unwrap_or("Please login to continue");
    match snapshot {
        Ok(Some(session)) => GateOutcome::Render(session),
        Ok(None) => GateOutcome::Redirect { to: AppRoute::Auth, notice: notice.to_owned() },
        Err(e) => GateOutcome::Redirect { to: AppRoute::Auth, notice: format!("{notice}: {e}") },
    }
}

/// Ungated session observer for chrome such as the navbar.
///
/// Starts signed-out so server and first client render agree, then picks up
/// the cached session after hydration and follows every later change.
pub fn use_session_watch() -> RwSignal<Option<Session>> {
    let session = RwSignal::new(None::<Session>);

    #[cfg(feature = "hydrate")]
    {
        let store = expect_context::<SessionStore>();
        let subscription = store.subscribe(move |_, current| session.set(current.cloned()));
        on_cleanup(move || drop(subscription));
        Effect::new(move || session.set(store.snapshot()));
    }

    session
}

/// Keep `state` in step with every change published to `store` for as long
/// as the current reactive owner lives.
pub fn attach_session_listener(store: &SessionStore, state: RwSignal<SessionState>) {
    let subscription = store.subscribe(move |_, session| {
        state.set(SessionState::resolved(session.cloned()));
    });
    on_cleanup(move || drop(subscription));
}

/// Resolve the initial snapshot for `route` and apply it to `state`.
///
/// On denial the notice is pushed to `toasts` once and the redirect target is
/// returned; navigating there is left to the caller.
pub async fn resolve_gate<P: IdentityProvider>(
    route: AppRoute,
    provider: &P,
    store: &SessionStore,
    state: RwSignal<SessionState>,
    toasts: RwSignal<ToastState>,
    now: i64,
) -> Option<AppRoute> {
    let snapshot = auth::current_session(provider, store, now).await;
    match resolve_snapshot(route, snapshot) {
        GateOutcome::Render(session) => {
            state.set(SessionState::resolved(Some(session)));
            None
        }
        GateOutcome::Redirect { to, notice } => {
            log::info!("gate denied {}: {notice}", route.path());
            state.set(SessionState::resolved(None));
            notify::error(toasts, notice);
            Some(to)
        }
    }
}

/// Install the gate for `route` and return the view's local session state.
///
/// Requires `SessionStore`, `BackendClient` and `RwSignal<ToastState>` in
/// context. Outside the browser the state stays `resolving`.
pub fn use_session_gate(route: AppRoute) -> RwSignal<SessionState> {
    let state = RwSignal::new(SessionState::resolving());

    #[cfg(feature = "hydrate")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        use crate::net::backend::BackendClient;
        use crate::util::time;

        let store = expect_context::<SessionStore>();
        let provider = expect_context::<BackendClient>();
        let toasts = expect_context::<RwSignal<ToastState>>();
        let navigate = use_navigate();

        attach_session_listener(&store, state);
        leptos::task::spawn_local(async move {
            if let Some(to) = resolve_gate(route, &provider, &store, state, toasts, time::now_secs()).await {
                navigate(to.path(), NavigateOptions::default());
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = route;
    }

    state
}
