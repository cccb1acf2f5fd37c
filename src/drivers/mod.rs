//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod button_isr;
pub mod hw_init;
pub mod leds;
pub mod pwm;
pub mod task_spawn;
pub mod watchdog;
