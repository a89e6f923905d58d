//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and shared building blocks while reading
//! shared state from Leptos context providers.

pub mod footer;
pub mod gate_notice;
pub mod navbar;
pub mod service_card;
pub mod toaster;
