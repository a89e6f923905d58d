//! Placeholder rendered by gated pages until the session is known.
//!
//! A denied visitor sees nothing here: the gate has already redirected and
//! shown its notice.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::util::gate::gate_status;

#[component]
pub fn GateNotice(state: RwSignal<SessionState>) -> impl IntoView {
    move || {
        gate_status(&state.get()).shows_spinner().then(|| {
            view! { <div class="gate gate--loading"><span class="spinner"></span>"Checking your session..."</div> }
        })
    }
}
