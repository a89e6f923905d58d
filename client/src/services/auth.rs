//! Session lifecycle on top of the identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The provider owns the session; [`SessionStore`] is the app's cached copy.
//! Every function here performs one provider call and then publishes the
//! outcome to the store, so listeners (navbar, gated views, persistence)
//! observe login, logout, refresh and profile edits uniformly.
//!
//! ERROR HANDLING
//! ==============
//! Provider failures are returned unchanged for the caller to surface as a
//! notification. A failed sign-out leaves the cache untouched unless the
//! provider says the session is already gone; a failed token refresh clears
//! it, since the cached tokens are no longer usable.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::backend::{IdentityError, IdentityProvider};
use crate::net::types::{Session, SessionUser, UserAttributes};
use crate::state::session::{AuthChangeEvent, SessionStore};

/// Result of a registration attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account is active and the user is now signed in.
    SignedIn,
    /// The provider requires e-mail confirmation before the first login.
    ConfirmationRequired,
}

impl SignUpOutcome {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::SignedIn => "Account created successfully!",
            Self::ConfirmationRequired => "Account created! Please check your email to confirm your account.",
        }
    }
}

/// Return a usable session, rotating tokens when the cached one is expired.
///
/// # Errors
///
/// Returns the provider error when rotation fails; the cache is cleared first.
pub async fn current_session<P: IdentityProvider>(
    provider: &P,
    store: &SessionStore,
    now: i64,
) -> Result<Option<Session>, IdentityError> {
    let Some(session) = store.snapshot() else {
        return Ok(None);
    };
    if !session.is_expired_at(now) {
        return Ok(Some(session));
    }

    log::debug!("access token expired; refreshing session for {}", session.user.id);
    match provider.refresh_session(&session.refresh_token).await {
        Ok(refreshed) => {
            store.publish(AuthChangeEvent::TokenRefreshed, Some(refreshed.clone()));
            Ok(Some(refreshed))
        }
        Err(e) => {
            log::warn!("session refresh failed: {e}");
            store.publish(AuthChangeEvent::SignedOut, None);
            Err(e)
        }
    }
}

/// # Errors
///
/// Returns the provider error for rejected credentials or transport failure.
pub async fn sign_in<P: IdentityProvider>(
    provider: &P,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Session, IdentityError> {
    let session = provider.sign_in_with_password(email.trim(), password).await?;
    log::info!("signed in as {}", session.user.id);
    store.publish(AuthChangeEvent::SignedIn, Some(session.clone()));
    Ok(session)
}

/// # Errors
///
/// Returns the provider error when registration is rejected.
pub async fn sign_up<P: IdentityProvider>(
    provider: &P,
    store: &SessionStore,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<SignUpOutcome, IdentityError> {
    match provider.sign_up(email.trim(), password, full_name.trim()).await? {
        Some(session) => {
            log::info!("registered and signed in as {}", session.user.id);
            store.publish(AuthChangeEvent::SignedIn, Some(session));
            Ok(SignUpOutcome::SignedIn)
        }
        None => Ok(SignUpOutcome::ConfirmationRequired),
    }
}

/// End the session. Signing out while already signed out succeeds without a
/// provider call, and so does a provider that no longer knows the token.
///
/// # Errors
///
/// Returns transport and server-side failures; the cached session is kept
/// in that case.
pub async fn sign_out<P: IdentityProvider>(provider: &P, store: &SessionStore) -> Result<(), IdentityError> {
    let Some(session) = store.snapshot() else {
        return Ok(());
    };
    match provider.sign_out(&session.access_token).await {
        Ok(()) => log::info!("signed out {}", session.user.id),
        Err(e) if e.is_session_gone() => log::info!("session for {} already ended: {e}", session.user.id),
        Err(e) => return Err(e),
    }
    store.publish(AuthChangeEvent::SignedOut, None);
    Ok(())
}

/// Change the signed-in user's display name.
///
/// # Errors
///
/// [`IdentityError::NotAuthenticated`] without a session, otherwise the provider error.
pub async fn update_profile<P: IdentityProvider>(
    provider: &P,
    store: &SessionStore,
    full_name: &str,
) -> Result<SessionUser, IdentityError> {
    let Some(mut session) = store.snapshot() else {
        return Err(IdentityError::NotAuthenticated);
    };
    let user = provider
        .update_user(&session.access_token, &UserAttributes::full_name(full_name.trim()))
        .await?;
    session.user = user.clone();
    store.publish(AuthChangeEvent::UserUpdated, Some(session));
    Ok(user)
}
