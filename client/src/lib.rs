//! # buddie-client
//!
//! Leptos + WASM frontend for Buddie, a catalogue where prospective students
//! browse courses and institutions, bookmark courses and leave comments.
//!
//! The crate holds pages, components, session state and a thin HTTP client
//! over the Buddie REST backend. The backend itself lives elsewhere.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: hydrates the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
