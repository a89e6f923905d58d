//! Process-wide session cache shared by every view.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is created by the root component and injected as
//! context. Views read it through [`SessionStore::snapshot`] and observe it
//! through [`SessionStore::subscribe`]; only the auth services publish.
//!
//! DESIGN
//! ======
//! Subscriptions are scoped resources: dropping the returned
//! [`Subscription`] deregisters the listener, so a view that stores it in
//! `on_cleanup` releases it on every exit path. Listeners are invoked after
//! the registry lock is released, which lets a listener read the store or
//! drop its own subscription.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::net::types::Session;

/// Why the session changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthChangeEvent {
    /// Session restored from storage when the app started.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

type Listener = Arc<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    current: Option<Session>,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared, observable copy of the identity provider's session.
#[derive(Clone, Default)]
pub struct SessionStore {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = lock(&self.registry);
        f.debug_struct("SessionStore")
            .field("signed_in", &registry.current.is_some())
            .field("listeners", &registry.listeners.len())
            .finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(initial: Option<Session>) -> Self {
        let registry = Registry { current: initial, ..Registry::default() };
        Self { registry: Arc::new(Mutex::new(registry)) }
    }

    /// Current session, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        lock(&self.registry).current.clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        lock(&self.registry).current.is_some()
    }

    /// Register `listener` for every later change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(AuthChangeEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        Subscription { id, registry: Arc::downgrade(&self.registry) }
    }

    /// Replace the cached session and notify every listener.
    pub fn publish(&self, event: AuthChangeEvent, session: Option<Session>) {
        let listeners: Vec<Listener> = {
            let mut registry = lock(&self.registry);
            registry.current = session.clone();
            registry.listeners.iter().map(|(_, listener)| Arc::clone(listener)).collect()
        };
        for listener in listeners {
            listener(event, session.as_ref());
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

/// Handle for a registered listener; deregisters on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Explicit form of dropping the handle.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// A view's local, reactive copy of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
    /// True until the initial snapshot has resolved.
    pub loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn resolving() -> Self {
        Self { session: None, loading: true }
    }

    #[must_use]
    pub fn resolved(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }
}
