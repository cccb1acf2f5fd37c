//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ActuatorsClaimed => {
                info!("PANEL | claimed, periodic tasks parked");
            }
            AppEvent::PatternStarted(cmd) => {
                info!("PATTERN | {:?} started", cmd);
            }
            AppEvent::PatternFinished(cmd) => {
                info!("PATTERN | {:?} finished", cmd);
            }
            AppEvent::UnknownCommand(id) => {
                warn!("PATTERN | unrecognized command {} — no actuation", id);
            }
            AppEvent::ActuatorsReleased => {
                info!("PANEL | released, periodic tasks resumed");
            }
        }
    }
}
