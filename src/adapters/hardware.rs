//! Panel hardware adapter.
//!
//! Implements [`ActuatorPort`] over the LED and PWM drivers for the
//! pattern executor.
//!
//! Note on shared hardware state: the periodic tasks drive the same
//! outputs through their own driver instances. That is deliberate —
//! actuator ownership is temporal, transferred by the pause protocol,
//! and this adapter is only ever called while the executor holds the
//! [`ActuatorClaim`](crate::sync::pause::ActuatorClaim) (or before the
//! tasks are spawned).

use crate::app::ports::{ActuatorPort, LedId};
use crate::drivers::leds::LedDriver;
use crate::drivers::pwm::PwmDriver;
use crate::pins;

pub struct HardwareAdapter {
    green: LedDriver,
    red: LedDriver,
    pwm: PwmDriver,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            green: LedDriver::new(pins::GREEN_LED_GPIO),
            red: LedDriver::new(pins::RED_LED_GPIO),
            pwm: PwmDriver::new(),
        }
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_output(&mut self, id: LedId, on: bool) {
        match id {
            LedId::Green => self.green.set(on),
            LedId::Red => self.red.set(on),
        }
    }

    fn set_pwm_level(&mut self, level: u16) {
        self.pwm.set_level(level);
    }

    fn set_pwm_percent(&mut self, percent: u8) {
        self.pwm.set_percent(percent);
    }

    fn all_off(&mut self) {
        self.green.off();
        self.red.off();
        self.pwm.set_level(0);
    }
}
