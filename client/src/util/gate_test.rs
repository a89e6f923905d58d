use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::net::types::{SessionUser, UserAttributes, UserMetadata};
use crate::state::session::AuthChangeEvent;

fn session_for(id: &str) -> Session {
    Session {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        expires_at: None,
        user: SessionUser {
            id: id.to_owned(),
            email: None,
            created_at: None,
            user_metadata: UserMetadata::default(),
        },
    }
}

fn session() -> Session {
    session_for("u1")
}

// =============================================================
// gate_status
// =============================================================

#[test]
fn resolving_until_loaded() {
    assert_eq!(gate_status(&SessionState::resolving()), GateStatus::Resolving);
}

#[test]
fn granted_with_session_denied_without() {
    assert_eq!(gate_status(&SessionState::resolved(Some(session()))), GateStatus::Granted);
    assert_eq!(gate_status(&SessionState::resolved(None)), GateStatus::Denied);
}

#[test]
fn only_resolving_shows_a_placeholder() {
    assert!(GateStatus::Resolving.shows_spinner());
    assert!(!GateStatus::Denied.shows_spinner());
    assert!(!GateStatus::Granted.shows_spinner());
}

// =============================================================
// resolve_snapshot
// =============================================================

#[test]
fn session_present_renders() {
    for route in AppRoute::ALL.into_iter().filter(|r| r.is_gated()) {
        assert_eq!(resolve_snapshot(route, Ok(Some(session()))), GateOutcome::Render(session()));
    }
}

#[test]
fn detection_without_session_redirects_with_notice() {
    assert_eq!(
        resolve_snapshot(AppRoute::Detection, Ok(None)),
        GateOutcome::Redirect { to: AppRoute::Auth, notice: "Please login to use disease detection".to_owned() }
    );
}

#[test]
fn assistant_without_session_redirects_with_notice() {
    assert_eq!(
        resolve_snapshot(AppRoute::Assistant, Ok(None)),
        GateOutcome::Redirect { to: AppRoute::Auth, notice: "Please login to use the AI Assistant".to_owned() }
    );
}

#[test]
fn every_gated_route_redirects_to_auth() {
    for route in AppRoute::ALL.into_iter().filter(|r| r.is_gated()) {
        let GateOutcome::Redirect { to, notice } = resolve_snapshot(route, Ok(None)) else {
            panic!("{route:?} rendered without a session");
        };
        assert_eq!(to, AppRoute::Auth);
        assert_eq!(Some(notice.as_str()), route.denied_notice());
    }
}

#[test]
fn snapshot_error_redirects_and_includes_reason() {
    let outcome = resolve_snapshot(AppRoute::Profile, Err(IdentityError::Transport("offline".to_owned())));
    assert_eq!(
        outcome,
        GateOutcome::Redirect {
            to: AppRoute::Auth,
            notice: "Please login to view your profile: network error: offline".to_owned(),
        }
    );
}

// =============================================================
// attach_session_listener / resolve_gate
// =============================================================

/// Provider whose token refresh stands in for an in-flight snapshot: while it
/// runs, another login is published to the store.
struct RacingProvider {
    store: SessionStore,
    state: RwSignal<SessionState>,
    refresh_fails: bool,
    listeners_during_refresh: Cell<usize>,
    state_during_refresh: RefCell<Option<SessionState>>,
}

impl RacingProvider {
    fn new(store: &SessionStore, state: RwSignal<SessionState>) -> Self {
        Self {
            store: store.clone(),
            state,
            refresh_fails: false,
            listeners_during_refresh: Cell::new(0),
            state_during_refresh: RefCell::new(None),
        }
    }
}

impl IdentityProvider for RacingProvider {
    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, IdentityError> {
        unreachable!("not used by the gate")
    }

    async fn sign_up(&self, _email: &str, _password: &str, _full_name: &str) -> Result<Option<Session>, IdentityError> {
        unreachable!("not used by the gate")
    }

    async fn refresh_session(&self, _refresh_token: &str) -> Result<Session, IdentityError> {
        self.listeners_during_refresh.set(self.store.listener_count());
        self.store.publish(AuthChangeEvent::SignedIn, Some(session_for("u2")));
        *self.state_during_refresh.borrow_mut() = Some(self.state.get_untracked());
        if self.refresh_fails {
            return Err(IdentityError::Provider { status: 400, message: "Invalid Refresh Token".to_owned() });
        }
        Ok(Session { access_token: "at-rotated".to_owned(), ..session() })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        unreachable!("not used by the gate")
    }

    async fn update_user(&self, _access_token: &str, _attributes: &UserAttributes) -> Result<SessionUser, IdentityError> {
        unreachable!("not used by the gate")
    }
}

fn expired() -> Session {
    Session { expires_at: Some(1_000), ..session() }
}

fn error_messages(toasts: RwSignal<ToastState>) -> Vec<String> {
    toasts.with_untracked(|t| t.toasts.iter().map(|toast| toast.message.clone()).collect())
}

#[test]
fn listener_is_released_with_its_owner() {
    let owner = Owner::new();
    let store = SessionStore::default();

    owner.with(|| {
        let state = RwSignal::new(SessionState::resolving());
        attach_session_listener(&store, state);
        assert_eq!(store.listener_count(), 1);

        store.publish(AuthChangeEvent::SignedIn, Some(session()));
        assert_eq!(gate_status(&state.get_untracked()), GateStatus::Granted);
    });

    owner.cleanup();
    assert_eq!(store.listener_count(), 0);
    store.publish(AuthChangeEvent::SignedOut, None);
}

#[test]
fn cached_session_is_granted_without_toast() {
    let owner = Owner::new();
    owner.with(|| {
        let store = SessionStore::new(Some(session()));
        let state = RwSignal::new(SessionState::resolving());
        let toasts = RwSignal::new(ToastState::default());
        let provider = RacingProvider::new(&store, state);

        attach_session_listener(&store, state);
        let redirect = block_on(resolve_gate(AppRoute::Detection, &provider, &store, state, toasts, 500));

        assert_eq!(redirect, None);
        assert_eq!(state.get_untracked(), SessionState::resolved(Some(session())));
        assert!(error_messages(toasts).is_empty());
    });
    owner.cleanup();
}

#[test]
fn missing_session_redirects_with_one_toast() {
    let owner = Owner::new();
    owner.with(|| {
        let store = SessionStore::default();
        let state = RwSignal::new(SessionState::resolving());
        let toasts = RwSignal::new(ToastState::default());
        let provider = RacingProvider::new(&store, state);

        attach_session_listener(&store, state);
        let redirect = block_on(resolve_gate(AppRoute::Profile, &provider, &store, state, toasts, 500));

        assert_eq!(redirect, Some(AppRoute::Auth));
        assert_eq!(gate_status(&state.get_untracked()), GateStatus::Denied);
        assert_eq!(error_messages(toasts), vec!["Please login to view your profile".to_owned()]);
    });
    owner.cleanup();
}

#[test]
fn change_during_snapshot_reaches_local_state() {
    let owner = Owner::new();
    owner.with(|| {
        let store = SessionStore::new(Some(expired()));
        let state = RwSignal::new(SessionState::resolving());
        let toasts = RwSignal::new(ToastState::default());
        let provider = RacingProvider::new(&store, state);

        attach_session_listener(&store, state);
        let redirect = block_on(resolve_gate(AppRoute::Assistant, &provider, &store, state, toasts, 2_000));

        assert_eq!(provider.listeners_during_refresh.get(), 1);
        let during = provider.state_during_refresh.borrow().clone().map(|s| s.session.map(|s| s.user.id));
        assert_eq!(during, Some(Some("u2".to_owned())));

        assert_eq!(redirect, None);
        let settled = state.get_untracked().session.map(|s| s.access_token);
        assert_eq!(settled, Some("at-rotated".to_owned()));
    });
    owner.cleanup();
}

#[test]
fn failed_snapshot_redirects_once_with_reason() {
    let owner = Owner::new();
    owner.with(|| {
        let store = SessionStore::new(Some(expired()));
        let state = RwSignal::new(SessionState::resolving());
        let toasts = RwSignal::new(ToastState::default());
        let provider = RacingProvider { refresh_fails: true, ..RacingProvider::new(&store, state) };

        attach_session_listener(&store, state);
        let redirect = block_on(resolve_gate(AppRoute::Detection, &provider, &store, state, toasts, 2_000));

        assert_eq!(redirect, Some(AppRoute::Auth));
        assert_eq!(gate_status(&state.get_untracked()), GateStatus::Denied);
        assert_eq!(
            error_messages(toasts),
            vec!["Please login to use disease detection: Invalid Refresh Token".to_owned()]
        );
    });
    owner.cleanup();
}
