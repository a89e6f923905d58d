//! One-shot toast notifications with auto-dismissal.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};

/// Show `message` and schedule its removal after `TOAST_TTL_MS`.
pub fn push(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let mut id = 0;
    toasts.update(|state| id = state.push(kind, message));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(crate::state::toast::TOAST_TTL_MS).await;
        toasts.update(|state| state.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

pub fn success(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    push(toasts, ToastKind::Success, message);
}

pub fn error(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    push(toasts, ToastKind::Error, message);
}
