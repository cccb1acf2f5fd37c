//! Application core — pure coordination logic, zero I/O.
//!
//! The pattern commands, cursor, and executor live here. All hardware
//! interaction happens through the **port traits** defined in
//! [`ports`], keeping this layer fully testable without peripherals.

pub mod button;
pub mod commands;
pub mod events;
pub mod executor;
pub mod ports;
