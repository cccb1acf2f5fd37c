//! Task coordination primitives.
//!
//! Two mechanisms carry the whole concurrency story of the panel:
//!
//! - [`notify::PressNotifier`] — the ISR-to-task signaling path
//!   (counting give from interrupt context, blocking take with timeout).
//! - [`pause`] — the exclusive-access protocol that lets the pattern
//!   executor borrow actuators owned by the periodic tasks.

pub mod notify;
pub mod pause;
