//! System context — shared state handed to every task at startup.
//!
//! The channel endpoints, the press notifier, the pause gate and the
//! run counters are built once by [`wire`] and moved into the tasks
//! that need them. Nothing task-visible lives in a `static` except the
//! ISR trampoline state owned by `drivers::button_isr`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::config::SystemConfig;
use crate::sync::notify::PressNotifier;
use crate::sync::pause::{ActuatorGate, PausePoint, pause_pair};

/// Per-task iteration counters, kept as relaxed atomics so any task
/// (or a test) can read a snapshot without coordination.
#[derive(Debug, Default)]
pub struct TaskStats {
    pub green_iterations: AtomicU32,
    pub red_iterations: AtomicU32,
    pub fade_iterations: AtomicU32,
    pub presses_handled: AtomicU32,
    pub patterns_run: AtomicU32,
}

/// A point-in-time copy of [`TaskStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub green_iterations: u32,
    pub red_iterations: u32,
    pub fade_iterations: u32,
    pub presses_handled: u32,
    pub patterns_run: u32,
}

impl TaskStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            green_iterations: self.green_iterations.load(Ordering::Relaxed),
            red_iterations: self.red_iterations.load(Ordering::Relaxed),
            fade_iterations: self.fade_iterations.load(Ordering::Relaxed),
            presses_handled: self.presses_handled.load(Ordering::Relaxed),
            patterns_run: self.patterns_run.load(Ordering::Relaxed),
        }
    }
}

/// Shared handles kept by the coordinator (main task).
pub struct SystemContext {
    /// Button press semaphore, also registered with the ISR trampoline.
    pub notifier: Arc<PressNotifier>,
    /// Pause gate over the three periodic actuator tasks.
    pub gate: ActuatorGate,
    /// Run counters, shared with every task.
    pub stats: Arc<TaskStats>,
}

/// Per-task handles, moved into the spawned tasks.
pub struct TaskWiring {
    pub green_pause: PausePoint,
    pub red_pause: PausePoint,
    pub fade_pause: PausePoint,
    /// Command queue producer (button task side).
    pub commands_tx: Sender<u8>,
    /// Command queue consumer (executor side).
    pub commands_rx: Receiver<u8>,
    /// Zero-capacity handshake: the button task sends one `()` after
    /// registering as the notifier's consumer; the bootstrap receives
    /// it before arming the interrupt. Rendezvous, not a buffer.
    pub button_ready_tx: Sender<()>,
    pub button_ready_rx: Receiver<()>,
}

/// Build all shared state for one system instance.
///
/// The gate holds the pause handles in spawn order; the executor
/// suspends them in that order and resumes in reverse.
pub fn wire(config: &SystemConfig) -> (SystemContext, TaskWiring) {
    let (green_pause, green_handle) = pause_pair("green-blink");
    let (red_pause, red_handle) = pause_pair("red-blink");
    let (fade_pause, fade_handle) = pause_pair("pwm-fade");

    let (commands_tx, commands_rx) = crossbeam_channel::bounded(config.queue_capacity);
    let (button_ready_tx, button_ready_rx) = crossbeam_channel::bounded(0);

    let context = SystemContext {
        notifier: Arc::new(PressNotifier::new()),
        gate: ActuatorGate::new(vec![green_handle, red_handle, fade_handle]),
        stats: Arc::new(TaskStats::new()),
    };

    let wiring = TaskWiring {
        green_pause,
        red_pause,
        fade_pause,
        commands_tx,
        commands_rx,
        button_ready_tx,
        button_ready_rx,
    };

    (context, wiring)
}
