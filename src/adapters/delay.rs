//! Sleeping delay adapter.
//!
//! Implements [`DelayPort`] with `thread::sleep`; on ESP-IDF this
//! blocks the calling FreeRTOS task at a well-defined suspension point.

use std::time::Duration;

use crate::app::ports::DelayPort;

pub struct SleepDelay;

impl DelayPort for SleepDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
