//! DOM-free rules for the page enhancer. Everything here builds and tests on
//! every target; `app` adapts it to the browser.

pub mod config;
pub mod error;
pub mod messaging;
pub mod nav;
pub mod theme;
pub mod wiring;
pub mod year;
