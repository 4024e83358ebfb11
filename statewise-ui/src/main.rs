//! Statewise Dashboard
//!
//! Regional case-statistics dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Country totals, day change and testing figures
//! - Per-state district tables, sortable with `Unknown` always last
//! - Demographic breakdowns
//! - Light/dark theme, remembered across visits
//! - Live "new content" alert fed by the data service
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It reads payloads from the Statewise API over HTTP and
//! listens for content updates over WebSocket. Sorting and the table view
//! model come from `statewise-core`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
