//! Networking modules for the two external collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` talks to the hosted identity/database service, `inference`
//! to the model API, and `types` defines the identity wire schema. The
//! inference schema lives in the shared `advisory` crate.

pub mod backend;
pub mod inference;
pub mod types;
