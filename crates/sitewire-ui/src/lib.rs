#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Sitewire page enhancer.
//!
//! Stamps the copyright year, highlights the active navigation link, applies
//! and toggles the light/dark theme, and wires the prefilled messaging links.
//! The rules under [`core`](crate::core) are DOM-free and build on every target; the
//! browser glue is compiled for wasm32 only.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::run_enhancer;
