//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Gated pages install the Session Gate from `util::gate`.

pub mod about;
pub mod assistant;
pub mod auth;
pub mod crop_recommend;
pub mod detection;
pub mod fertilizer;
pub(crate) mod form;
pub mod home;
pub mod not_found;
pub mod profile;
