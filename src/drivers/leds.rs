//! Simple on/off LED driver.
//!
//! One instance per LED; tracks the last-written level so the owning
//! task can toggle without a hardware readback.

use crate::drivers::hw_init;

pub struct LedDriver {
    gpio: i32,
    on: bool,
}

impl LedDriver {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_set(self.gpio, on);
        self.on = on;
    }

    pub fn toggle(&mut self) {
        self.set(!self.on);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
