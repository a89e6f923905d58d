//! Client-side state shared between views.

pub mod request;
pub mod session;
pub mod toast;
