//! # client
//!
//! Leptos + WASM frontend for the Krishi Mithra crop-advisory app.
//!
//! This crate contains routes, pages, components, the shared session store,
//! and HTTP clients for the hosted identity/database backend and the
//! inference API. The `hydrate` feature builds the browser bundle; the `ssr`
//! feature lets the `server` crate render the same routes.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod services;
pub mod state;
pub mod util;

/// Browser entry point invoked by the generated JS glue.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
