//! BlinkPanel Firmware — Main Entry Point
//!
//! Bootstrap order matters here:
//!
//! 1. ESP-IDF runtime patches + logger.
//! 2. Peripheral init (GPIO directions, LEDC timer, ISR service) —
//!    all before any task exists.
//! 3. Wire the shared context (notifier, pause gate, command queue).
//! 4. Spawn the periodic tasks and the button task.
//! 5. Arm the button interrupt — last, so every edge that fires finds
//!    a registered consumer.
//! 6. Run the pattern executor loop on this (main) task.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use blinkpanel::config::SystemConfig;
use blinkpanel::context::wire;
use blinkpanel::drivers::{button_isr, hw_init};
use blinkpanel::drivers::task_spawn::spawn_task;
use blinkpanel::tasks;

// Task priorities: actuator tasks above the button path so a pending
// pattern never starves the blinkers of their toggle deadlines.
const ACTUATOR_TASK_PRIORITY: u8 = 4;
const BUTTON_TASK_PRIORITY: u8 = 3;
const EXECUTOR_TASK_PRIORITY: u8 = 2;
const TASK_STACK_KB: usize = 4;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BlinkPanel v{}                   ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Hardware peripherals ───────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration + shared context ─────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    let (ctx, wiring) = wire(&config);

    // ── 4. Spawn tasks ────────────────────────────────────────
    let _green = spawn_task(ACTUATOR_TASK_PRIORITY, TASK_STACK_KB, "green-blink\0", {
        let stats = ctx.stats.clone();
        let cfg = config.clone();
        let pause = wiring.green_pause;
        move || tasks::green_blink_task(pause, stats, cfg)
    });
    let _red = spawn_task(ACTUATOR_TASK_PRIORITY, TASK_STACK_KB, "red-blink\0", {
        let stats = ctx.stats.clone();
        let cfg = config.clone();
        let pause = wiring.red_pause;
        move || tasks::red_blink_task(pause, stats, cfg)
    });
    let _fade = spawn_task(ACTUATOR_TASK_PRIORITY, TASK_STACK_KB, "pwm-fade\0", {
        let stats = ctx.stats.clone();
        let cfg = config.clone();
        let pause = wiring.fade_pause;
        move || tasks::pwm_fade_task(pause, stats, cfg)
    });
    let _button = spawn_task(BUTTON_TASK_PRIORITY, TASK_STACK_KB, "button\0", {
        let notifier = ctx.notifier.clone();
        let stats = ctx.stats.clone();
        let cfg = config.clone();
        let tx = wiring.commands_tx;
        let ready = wiring.button_ready_tx;
        move || tasks::button_task(notifier, tx, ready, stats, cfg)
    });

    // ── 5. Arm the button interrupt ───────────────────────────
    // Rendezvous with the button task: it registers itself as the
    // notifier's consumer from its own context, then signals readiness.
    // Only after that is the edge enabled, so no press can fire into an
    // unconsumed notifier.
    wiring.button_ready_rx.recv()?;
    if let Err(e) = button_isr::install(ctx.notifier.clone()) {
        error!("Button ISR install failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if button_isr::unwired_edges() > 0 {
        warn!(
            "{} button edge(s) fired before startup completed",
            button_isr::unwired_edges()
        );
    }

    info!("Startup complete — {} tasks running", ctx.gate.len() + 1);

    // ── 6. Pattern executor on the main task ──────────────────
    // Below the actuator and button tasks: a running script must not
    // preempt the blinkers' toggle deadlines once they resume.
    unsafe {
        esp_idf_svc::sys::vTaskPrioritySet(core::ptr::null_mut(), EXECUTOR_TASK_PRIORITY.into());
    }
    tasks::pattern_executor_task(&ctx, wiring.commands_rx, &config);

    // Only reachable if the command queue closes, which means every
    // producer task has died.
    error!("Executor stopped — command queue closed");
    Ok(())
}
