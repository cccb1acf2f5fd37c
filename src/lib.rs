//! BlinkPanel firmware library.
//!
//! Exposes the coordination core for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the entire
//! crate builds and tests on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod context;
pub mod sync;
pub mod tasks;

mod error;
pub mod pins;

// Hardware-facing modules; register-level implementations are guarded
// by cfg attributes inside, with in-memory simulation fallbacks.
pub mod adapters;
pub mod drivers;

pub use error::{Error, Result};
