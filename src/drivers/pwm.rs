//! PWM duty driver for the fade LED.
//!
//! Wraps the LEDC comparator with clamped level/percent writes and
//! owns the fade ramp state (brightness + direction). The ramp steps
//! up to the panel maximum, turns around, and steps back to zero —
//! monotonic-safe to pause and continue from anywhere.

use crate::drivers::hw_init;
use crate::pins::PWM_MAX_LEVEL;

pub struct PwmDriver {
    level: u16,
    rising: bool,
}

impl Default for PwmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmDriver {
    pub fn new() -> Self {
        Self {
            level: 0,
            rising: true,
        }
    }

    /// Set the raw comparator value. Clamped to the panel maximum by
    /// this interface, not by callers.
    pub fn set_level(&mut self, level: u16) {
        self.level = level.min(PWM_MAX_LEVEL);
        hw_init::ledc_set(self.level);
    }

    /// Set the duty as a percentage, clamped to 100.
    pub fn set_percent(&mut self, percent: u8) {
        let percent = u32::from(percent.min(100));
        let level = (u32::from(PWM_MAX_LEVEL) + 1) * percent / 100;
        self.set_level(level as u16);
    }

    /// Advance the fade ramp by `step` and write the new level.
    /// Returns the level written.
    pub fn fade_step(&mut self, step: u16) -> u16 {
        if self.rising {
            self.level = self.level.saturating_add(step).min(PWM_MAX_LEVEL);
            if self.level >= PWM_MAX_LEVEL {
                self.rising = false;
            }
        } else {
            self.level = self.level.saturating_sub(step);
            if self.level == 0 {
                self.rising = true;
            }
        }
        hw_init::ledc_set(self.level);
        self.level
    }

    pub fn level(&self) -> u16 {
        self.level
    }
}
