//! Mock panel adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use blinkpanel::app::events::AppEvent;
use blinkpanel::app::ports::{ActuatorPort, DelayPort, EventSink, LedId};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorCall {
    SetOutput { id: LedId, on: bool },
    SetPwmLevel { level: u16 },
    SetPwmPercent { percent: u8 },
    AllOff,
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    /// Effective state of one LED after the recorded call history.
    pub fn led_on(&self, led: LedId) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetOutput { id, on } if *id == led => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Every percent value written to the PWM channel, in order.
    pub fn percent_history(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::SetPwmPercent { percent } => Some(*percent),
                _ => None,
            })
            .collect()
    }
}

impl ActuatorPort for MockPanel {
    fn set_output(&mut self, id: LedId, on: bool) {
        self.calls.push(ActuatorCall::SetOutput { id, on });
    }

    fn set_pwm_level(&mut self, level: u16) {
        self.calls.push(ActuatorCall::SetPwmLevel { level });
    }

    fn set_pwm_percent(&mut self, percent: u8) {
        self.calls.push(ActuatorCall::SetPwmPercent { percent });
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── Delay that only counts ────────────────────────────────────

#[derive(Default)]
pub struct NoDelay {
    pub total_ms: u64,
}

impl DelayPort for NoDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
