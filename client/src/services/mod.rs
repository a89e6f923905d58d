//! Workflows that combine the identity provider, the inference API and the
//! shared session cache. Views call these instead of the raw clients.

pub mod auth;
pub mod detection;
