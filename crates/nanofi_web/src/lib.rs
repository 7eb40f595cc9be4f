//! Browser-hosted NanoFi app.
//!
//! This crate is intentionally a stub by default so the workspace builds on native
//! targets without requiring wasm toolchains. The host-side [`ui_model`] is always
//! compiled so its labels and navigation inventory can be unit-tested.
//!
//! Enable the real app with: `--features web` (and a wasm32 target).

pub mod ui_model;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
