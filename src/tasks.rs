//! Task bodies — the loops that run inside each spawned task.
//!
//! Four periodic/reactive tasks plus the executor loop that the main
//! task runs itself:
//!
//! | Task          | Drives          | Cadence                  |
//! |---------------|-----------------|--------------------------|
//! | `green_blink` | green LED       | `green_period_ms`        |
//! | `red_blink`   | red LED         | `red_period_ms`          |
//! | `pwm_fade`    | PWM duty ramp   | `fade_step_interval_ms`  |
//! | `button`      | command queue   | notifier-driven          |
//! | `executor`    | pattern scripts | queue-driven             |
//!
//! Each periodic loop hits its pause checkpoint exactly once per
//! iteration, before touching hardware, so a parked task is guaranteed
//! to be between actuations.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info};

use crate::adapters::delay::SleepDelay;
use crate::adapters::hardware::HardwareAdapter;
use crate::adapters::log_sink::LogEventSink;
use crate::app::button::ButtonController;
use crate::app::executor::PatternExecutor;
use crate::config::SystemConfig;
use crate::context::{SystemContext, TaskStats};
use crate::drivers::leds::LedDriver;
use crate::drivers::pwm::PwmDriver;
use crate::drivers::watchdog::Watchdog;
use crate::pins;
use crate::sync::notify::PressNotifier;
use crate::sync::pause::PausePoint;

/// Toggle the green LED forever at the configured period.
pub fn green_blink_task(pause: PausePoint, stats: Arc<TaskStats>, config: SystemConfig) {
    let mut led = LedDriver::new(pins::GREEN_LED_GPIO);
    info!("green-blink: running, period {}ms", config.green_period_ms);
    loop {
        pause.checkpoint();
        led.toggle();
        stats.green_iterations.fetch_add(1, Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(config.green_period_ms));
    }
}

/// Toggle the red LED forever at the configured period.
pub fn red_blink_task(pause: PausePoint, stats: Arc<TaskStats>, config: SystemConfig) {
    let mut led = LedDriver::new(pins::RED_LED_GPIO);
    info!("red-blink: running, period {}ms", config.red_period_ms);
    loop {
        pause.checkpoint();
        led.toggle();
        stats.red_iterations.fetch_add(1, Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(config.red_period_ms));
    }
}

/// Ramp the PWM duty up and down forever, one step per interval.
pub fn pwm_fade_task(pause: PausePoint, stats: Arc<TaskStats>, config: SystemConfig) {
    let mut pwm = PwmDriver::new();
    info!(
        "pwm-fade: running, step {} every {}ms",
        config.fade_step, config.fade_step_interval_ms
    );
    loop {
        pause.checkpoint();
        pwm.fade_step(config.fade_step);
        stats.fade_iterations.fetch_add(1, Ordering::Relaxed);
        std::thread::sleep(Duration::from_millis(config.fade_step_interval_ms));
    }
}

/// Wait for button presses and enqueue the next pattern identifier.
///
/// Registers itself as the notifier's consumer, then completes the
/// `ready` rendezvous so the bootstrap can arm the interrupt knowing
/// the consumer exists. `send` blocks when the queue is full — presses
/// beyond capacity delay this task, they are never dropped.
pub fn button_task(
    notifier: Arc<PressNotifier>,
    commands_tx: Sender<u8>,
    ready: Sender<()>,
    stats: Arc<TaskStats>,
    config: SystemConfig,
) {
    notifier.register_consumer();
    // A dropped receiver means nobody is waiting on startup ordering.
    let _ = ready.send(());
    drop(ready);
    info!(
        "button: consumer registered, wait timeout {}ms",
        config.notify_timeout_ms
    );
    let mut controller = ButtonController::new();
    let timeout = Duration::from_millis(config.notify_timeout_ms);
    loop {
        let notified = notifier.take(timeout);
        if let Some(id) = controller.poll(notified) {
            if commands_tx.send(id).is_err() {
                error!("button: command queue closed, stopping");
                return;
            }
            stats.presses_handled.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Drain the command queue and play each pattern to completion.
///
/// Runs on the main task after startup. Wakes on an idle heartbeat to
/// feed the watchdog even when no commands arrive.
pub fn pattern_executor_task(ctx: &SystemContext, commands_rx: Receiver<u8>, config: &SystemConfig) {
    let mut executor = PatternExecutor::new();
    let mut hw = HardwareAdapter::new();
    let mut delay = SleepDelay;
    let mut sink = LogEventSink::new();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let heartbeat = Duration::from_millis(config.idle_heartbeat_ms);
    info!("executor: waiting for commands");
    loop {
        match commands_rx.recv_timeout(heartbeat) {
            Ok(raw) => {
                executor.run(raw, &ctx.gate, &mut hw, &mut delay, &mut sink, config);
                ctx.stats.patterns_run.fetch_add(1, Ordering::Relaxed);
                watchdog.feed();
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!("executor: idle heartbeat");
                watchdog.feed();
            }
            Err(RecvTimeoutError::Disconnected) => {
                error!("executor: command queue closed, stopping");
                return;
            }
        }
    }
}
