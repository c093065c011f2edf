//! Mind map desktop shell: window lifecycle, application menu, and a
//! validated file bridge for the untrusted UI.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod bridge;
pub mod config;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
