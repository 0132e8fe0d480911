//! SmartBin Dashboard
//!
//! Monitoring dashboard for a four-compartment smart waste bin, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - Simulated bin state with thresholds, scheduling and collection history
//! - Live readings from deployed bins over a realtime change feed
//! - Alert evaluation with per-bin and system-wide cooldowns
//! - Analytics and CSV export over the collection log
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Remote data comes from a managed Supabase project via HTTP
//! and WebSocket; the simulated bin state lives entirely in the browser.

use leptos::*;

mod app;
mod components;
mod domain;
mod i18n;
mod pages;
mod state;
mod supabase;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
