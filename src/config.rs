//! System configuration parameters
//!
//! All tunable parameters for the BlinkPanel coordination layer: task
//! periods, pattern script constants, and queue/timeout sizing.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::pins::PWM_MAX_LEVEL;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Periodic tasks ---
    /// Green LED toggle period (milliseconds).
    pub green_period_ms: u64,
    /// Red LED toggle period (milliseconds).
    pub red_period_ms: u64,
    /// Interval between PWM fade ramp steps (milliseconds).
    pub fade_step_interval_ms: u64,
    /// Brightness delta per fade step (raw duty units, 0..=999 range).
    pub fade_step: u16,

    // --- Button / notify path ---
    /// Button task notification wait timeout (milliseconds).
    /// A timeout is the normal idle path, not an error.
    pub notify_timeout_ms: u64,

    // --- Command queue ---
    /// Bounded command queue capacity. A full queue blocks the producer.
    pub queue_capacity: usize,

    // --- Pattern scripts ---
    /// Number of on/off cycles for the blink patterns.
    pub blink_count: u32,
    /// Delay between blink edges (milliseconds).
    pub blink_interval_ms: u32,
    /// PWM sweep increment (percent per step).
    pub sweep_step_percent: u8,
    /// Delay between sweep steps (milliseconds).
    pub sweep_step_delay_ms: u32,

    // --- Executor ---
    /// Idle-wait heartbeat for the executor's dequeue (milliseconds).
    /// Used only to feed the watchdog; a wakeup with no command loops
    /// straight back into the blocking wait.
    pub idle_heartbeat_ms: u64,
    /// Executor stall watchdog timeout (milliseconds). Must exceed the
    /// idle heartbeat, which is the watchdog's feed cadence.
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Periodic tasks
            green_period_ms: 500,
            red_period_ms: 500,
            fade_step_interval_ms: 100,
            fade_step: 10,

            // Button
            notify_timeout_ms: 5,

            // Queue
            queue_capacity: 5,

            // Patterns
            blink_count: 4,
            blink_interval_ms: 200,
            sweep_step_percent: 10,
            sweep_step_delay_ms: 50,

            // Executor
            idle_heartbeat_ms: 1_000,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Validate the configuration at startup.
    ///
    /// A bad configuration is fatal: the system must not start with a
    /// zero-capacity queue or a degenerate pattern script.
    pub fn validate(&self) -> Result<(), Error> {
        if self.green_period_ms == 0 || self.red_period_ms == 0 {
            return Err(Error::Config("LED periods must be nonzero"));
        }
        if self.fade_step_interval_ms == 0 {
            return Err(Error::Config("fade step interval must be nonzero"));
        }
        if self.fade_step == 0 || self.fade_step > PWM_MAX_LEVEL {
            return Err(Error::Config("fade step out of range"));
        }
        if self.queue_capacity == 0 {
            return Err(Error::Config("queue capacity must be nonzero"));
        }
        if self.blink_count == 0 {
            return Err(Error::Config("blink count must be nonzero"));
        }
        if self.sweep_step_percent == 0 || 100 % self.sweep_step_percent != 0 {
            return Err(Error::Config("sweep step must divide 100"));
        }
        if u64::from(self.watchdog_timeout_ms) <= self.idle_heartbeat_ms {
            return Err(Error::Config(
                "watchdog timeout must exceed the idle heartbeat",
            ));
        }
        Ok(())
    }
}
