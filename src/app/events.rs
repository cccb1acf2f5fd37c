//! Outbound application events.
//!
//! The executor emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — today that is the serial log.

use super::commands::PatternCommand;

/// Structured events emitted by the coordination core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The executor claimed the panel (all periodic tasks parked).
    ActuatorsClaimed,
    /// A pattern script began executing.
    PatternStarted(PatternCommand),
    /// A pattern script ran to completion.
    PatternFinished(PatternCommand),
    /// A queued identifier decoded to no known pattern. Reported, not
    /// fatal; the executor releases the panel without actuating.
    UnknownCommand(u8),
    /// The executor released the panel (periodic tasks resumed).
    ActuatorsReleased,
}
