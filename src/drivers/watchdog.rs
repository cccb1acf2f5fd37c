//! Executor stall watchdog.
//!
//! Subscribes the pattern executor's task to the ESP-IDF task watchdog
//! (TWDT) so a wedged script or a lost queue endpoint reboots the panel
//! instead of leaving it frozen mid-pattern with the periodic tasks
//! parked. The executor feeds it once per wakeup — command or idle
//! heartbeat alike — so the timeout must exceed `idle_heartbeat_ms`
//! plus the longest pattern script; `SystemConfig::validate` enforces
//! the heartbeat half of that.

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    armed: bool,
}

impl Watchdog {
    /// Arm the stall watchdog for the calling task.
    ///
    /// Must run in the executor loop's own context, before the first
    /// dequeue. A subscription failure is degraded service, not fatal:
    /// the executor runs unwatched.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            Self {
                armed: arm(timeout_ms),
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::debug!("watchdog(sim): {}ms stall limit, no-op", timeout_ms);
            Self {}
        }
    }

    /// Reset the stall timer. Called once per executor wakeup.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.armed {
            unsafe {
                esp_idf_svc::sys::esp_task_wdt_reset();
            }
        }
    }
}

#[cfg(target_os = "espidf")]
fn arm(timeout_ms: u32) -> bool {
    use esp_idf_svc::sys::*;

    let cfg = esp_task_wdt_config_t {
        timeout_ms,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    let rc = unsafe { esp_task_wdt_reconfigure(&cfg) };
    if rc != ESP_OK {
        log::warn!("watchdog: reconfigure rc={} (already configured?)", rc);
    }

    let rc = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
    if rc != ESP_OK {
        log::warn!("watchdog: executor not subscribed (rc={})", rc);
        return false;
    }
    log::info!(
        "watchdog: executor subscribed, {}ms stall limit, panic on trigger",
        timeout_ms
    );
    true
}
