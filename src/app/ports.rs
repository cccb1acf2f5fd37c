//! Port traits — the boundary between coordination logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ executor / tasks (domain)
//! ```
//!
//! Driven adapters implement these traits; the domain consumes them via
//! generics, so the coordination core never touches registers directly.

use super::events::AppEvent;

/// On/off LEDs on the panel. The PWM LED is addressed separately
/// through the duty interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedId {
    Green,
    Red,
}

/// Write-side port: the domain calls this to command the panel.
///
/// No failure mode is exposed — output writes are single-register
/// operations assumed always to succeed. Range clamping is the
/// implementation's job, not the caller's.
pub trait ActuatorPort {
    /// Assert/deassert a named digital output.
    fn set_output(&mut self, id: LedId, on: bool);

    /// Set the PWM comparator value (clamped to the panel maximum).
    fn set_pwm_level(&mut self, level: u16);

    /// Set the PWM duty as a percentage (clamped to 100).
    fn set_pwm_percent(&mut self, percent: u8);

    /// Force the safe state: every output off, PWM duty zero.
    fn all_off(&mut self);
}

/// Blocking delay used between pattern script steps.
///
/// A trait rather than `thread::sleep` so script tests can record the
/// step timing instead of waiting it out.
pub trait DelayPort {
    fn delay_ms(&mut self, ms: u32);
}

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
