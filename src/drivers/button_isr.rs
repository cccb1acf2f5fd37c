//! Button falling-edge interrupt wiring.
//!
//! The handler runs in interrupt context and must stay short and
//! non-blocking: the shared GPIO ISR service acknowledges the pending
//! flag for the line before dispatching here, and the handler's only
//! work is one lock-free give on the press notifier.
//!
//! If an edge fires before a consumer task has registered, the event is
//! dropped and counted — a configuration error that must never happen
//! once the system is fully started. The counter lets the bootstrap
//! surface it from task context, where logging is safe.

use std::sync::{Arc, OnceLock};

use core::sync::atomic::{AtomicU32, Ordering};

use crate::drivers::hw_init::HwInitError;
use crate::sync::notify::PressNotifier;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Notifier reference reachable from interrupt context. Set once by
/// [`install`]; the one unavoidable static in the core.
static NOTIFIER: OnceLock<Arc<PressNotifier>> = OnceLock::new();

/// Edges that fired with no registered consumer. Diagnostic only.
static UNWIRED_EDGES: AtomicU32 = AtomicU32::new(0);

/// Register the falling-edge handler for the button line.
///
/// The consumer task must call
/// [`PressNotifier::register_consumer`] from its own context; edges
/// that fire before that are dropped and counted.
pub fn install(notifier: Arc<PressNotifier>) -> Result<(), HwInitError> {
    if NOTIFIER.set(notifier).is_err() {
        // Second install: the existing wiring stays in effect.
        log::warn!("button_isr: already installed");
        return Ok(());
    }

    #[cfg(target_os = "espidf")]
    {
        let ret = unsafe {
            esp_idf_svc::sys::gpio_isr_handler_add(
                pins::BUTTON_GPIO,
                Some(on_falling_edge),
                core::ptr::null_mut(),
            )
        };
        if ret != esp_idf_svc::sys::ESP_OK {
            return Err(HwInitError::IsrHandlerFailed(ret));
        }
        log::info!("button_isr: handler armed on GPIO {}", pins::BUTTON_GPIO);
    }

    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn on_falling_edge(_arg: *mut core::ffi::c_void) {
    dispatch_edge();
}

/// Shared edge path: give one notification, or count the drop.
/// Interrupt-safe — a single atomic give, no locks, no logging.
fn dispatch_edge() {
    match NOTIFIER.get() {
        Some(n) if n.signal_from_isr() => {}
        _ => {
            UNWIRED_EDGES.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Edges dropped because no consumer was registered. Nonzero after
/// startup completes indicates a wiring bug in the bootstrap.
pub fn unwired_edges() -> u32 {
    UNWIRED_EDGES.load(Ordering::Relaxed)
}

/// Inject a press from the simulation harness. Host only — stands in
/// for the falling-edge interrupt.
#[cfg(not(target_os = "espidf"))]
pub fn simulate_press() {
    dispatch_edge();
}
