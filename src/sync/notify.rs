//! ISR-to-task press notification.
//!
//! A counting signal with FreeRTOS task-notification semantics: the
//! interrupt handler *gives* (increments a pending counter, never
//! blocks), and exactly one consumer task *takes* (blocks with a
//! timeout, then consumes the whole count at once). Rapid firings that
//! land before the consumer runs coalesce into a bounded count — none
//! are lost, and none grow past the counter representation.
//!
//! ## Dual-target design
//!
//! - **`target_os = "espidf"`** — maps directly onto the FreeRTOS
//!   task-notification API: `vTaskNotifyGiveFromISR` on the give side,
//!   `ulTaskNotifyTake` (clear-on-exit) on the take side. The give path
//!   is a single lock-free store, safe from interrupt context, followed
//!   by a yield request when it woke a higher-priority task.
//! - **host / simulation** — a `Mutex<u32>` + `Condvar` pair. The
//!   simulated "ISR" is a plain thread, so locking on the give side is
//!   acceptable there.
//!
//! Invariant: at most one task ever waits on a notifier. On ESP-IDF the
//! signal is delivered to the registered consumer's own notification
//! slot, so a second waiter would simply never be woken.

use core::num::NonZeroU32;
use std::time::Duration;

#[cfg(not(target_os = "espidf"))]
use std::sync::{Condvar, Mutex, PoisonError};
#[cfg(not(target_os = "espidf"))]
use std::time::Instant;

#[cfg(target_os = "espidf")]
use core::sync::atomic::{AtomicPtr, Ordering};

/// Counting press signal connecting the button ISR to the button task.
///
/// Created once at startup and shared by reference for the process
/// lifetime; never destroyed.
pub struct PressNotifier {
    #[cfg(target_os = "espidf")]
    consumer: AtomicPtr<core::ffi::c_void>,

    #[cfg(not(target_os = "espidf"))]
    pending: Mutex<u32>,
    #[cfg(not(target_os = "espidf"))]
    wake: Condvar,
    #[cfg(not(target_os = "espidf"))]
    registered: core::sync::atomic::AtomicBool,
}

impl Default for PressNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl PressNotifier {
    pub fn new() -> Self {
        Self {
            consumer: AtomicPtr::new(core::ptr::null_mut()),
        }
    }

    /// Register the calling task as the sole consumer.
    ///
    /// Must run in the consumer task's own context before the button
    /// interrupt is enabled; the ISR drops (and counts) edges that fire
    /// earlier.
    pub fn register_consumer(&self) {
        let handle = unsafe { esp_idf_svc::sys::xTaskGetCurrentTaskHandle() };
        self.consumer.store(handle.cast(), Ordering::Release);
    }

    /// Whether a consumer task has been registered.
    pub fn is_registered(&self) -> bool {
        !self.consumer.load(Ordering::Acquire).is_null()
    }

    /// Give one notification. Safe from interrupt context (lock-free).
    ///
    /// Returns `false` when no consumer is registered — a configuration
    /// error the caller must report; the event is otherwise dropped.
    ///
    /// When the give unblocks a higher-priority waiter, a context
    /// switch is requested so the consumer runs as soon as the
    /// interrupt returns, not at the next tick.
    pub fn signal_from_isr(&self) -> bool {
        let handle = self.consumer.load(Ordering::Acquire);
        if handle.is_null() {
            return false;
        }
        let mut woken: i32 = 0;
        unsafe {
            esp_idf_svc::sys::vTaskGenericNotifyGiveFromISR(handle.cast(), 0, &mut woken);
        }
        if woken != 0 {
            esp_idf_hal::task::do_yield();
        }
        true
    }

    /// Block up to `timeout` for a nonzero notification count.
    ///
    /// Consumes the entire pending count (clear-on-exit) and returns it;
    /// `None` on timeout, which is the normal idle path.
    pub fn take(&self, timeout: Duration) -> Option<NonZeroU32> {
        let ticks = ms_to_ticks(timeout.as_millis() as u64);
        let count = unsafe { esp_idf_svc::sys::ulTaskGenericNotifyTake(0, 1, ticks) };
        NonZeroU32::new(count)
    }
}

#[cfg(target_os = "espidf")]
fn ms_to_ticks(ms: u64) -> u32 {
    let tick_ms = u64::from(1_000 / esp_idf_svc::sys::configTICK_RATE_HZ).max(1);
    ms.div_ceil(tick_ms) as u32
}

#[cfg(not(target_os = "espidf"))]
impl PressNotifier {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(0),
            wake: Condvar::new(),
            registered: core::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Register the calling task as the sole consumer.
    pub fn register_consumer(&self) {
        self.registered
            .store(true, core::sync::atomic::Ordering::Release);
    }

    /// Whether a consumer task has been registered.
    pub fn is_registered(&self) -> bool {
        self.registered.load(core::sync::atomic::Ordering::Acquire)
    }

    /// Give one notification (saturating — a stuck consumer must not
    /// wrap the counter back to zero).
    ///
    /// Returns `false` when no consumer is registered.
    pub fn signal_from_isr(&self) -> bool {
        if !self.is_registered() {
            return false;
        }
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending = pending.saturating_add(1);
        self.wake.notify_one();
        true
    }

    /// Block up to `timeout` for a nonzero notification count.
    ///
    /// Consumes the entire pending count and returns it; `None` on
    /// timeout, which is the normal idle path.
    pub fn take(&self, timeout: Duration) -> Option<NonZeroU32> {
        let deadline = Instant::now() + timeout;
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if *pending > 0 {
                let count = *pending;
                *pending = 0;
                return NonZeroU32::new(count);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _timed_out) = self
                .wake
                .wait_timeout(pending, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            pending = guard;
        }
    }
}
