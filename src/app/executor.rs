//! Pattern executor — exclusive playback of scripted actuation
//! sequences.
//!
//! One command runs through five states:
//!
//! ```text
//! Idle ─▶ Acquiring ─▶ ForcingSafeState ─▶ Executing ─▶ Releasing ─▶ Idle
//! ```
//!
//! - **Acquiring** parks every periodic task via the
//!   [`ActuatorGate`](crate::sync::pause::ActuatorGate).
//! - **ForcingSafeState** zeroes every actuator the scripts touch — a
//!   periodic task may have been parked mid-cycle leaving an LED lit or
//!   the duty register anywhere in its ramp.
//! - **Executing** plays the script for the decoded command. An
//!   identifier that decodes to no known pattern skips straight to
//!   Releasing with no actuation (reported, not fatal).
//! - **Releasing** drops the claim, resuming the periodic tasks.

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::sync::pause::ActuatorGate;

use super::commands::PatternCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, DelayPort, EventSink, LedId};

/// Executor lifecycle states. Tracked for diagnostics; the transitions
/// happen inside [`PatternExecutor::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Idle,
    Acquiring,
    ForcingSafeState,
    Executing,
    Releasing,
}

/// The single consumer of the command queue.
pub struct PatternExecutor {
    state: ExecutorState,
}

impl Default for PatternExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExecutor {
    pub fn new() -> Self {
        Self {
            state: ExecutorState::Idle,
        }
    }

    /// Current lifecycle state. Outside [`run`] this is always `Idle`.
    pub fn state(&self) -> ExecutorState {
        self.state
    }

    /// Execute one dequeued command identifier to completion.
    ///
    /// Claims the panel, forces the safe state, plays the script, and
    /// releases — returning with the executor back in `Idle` and the
    /// periodic tasks running again, whatever the identifier decoded to.
    pub fn run(
        &mut self,
        raw: u8,
        gate: &ActuatorGate,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
        sink: &mut impl EventSink,
        config: &SystemConfig,
    ) {
        self.state = ExecutorState::Acquiring;
        let claim = gate.acquire();
        sink.emit(&AppEvent::ActuatorsClaimed);

        self.state = ExecutorState::ForcingSafeState;
        hw.all_off();

        match PatternCommand::try_from(raw) {
            Ok(cmd) => {
                self.state = ExecutorState::Executing;
                info!("executor: playing {:?}", cmd);
                sink.emit(&AppEvent::PatternStarted(cmd));
                match cmd {
                    PatternCommand::GreenBlink => {
                        Self::blink(LedId::Green, hw, delay, config);
                    }
                    PatternCommand::PwmSweep => Self::sweep(hw, delay, config),
                    PatternCommand::RedBlink => {
                        Self::blink(LedId::Red, hw, delay, config);
                    }
                }
                sink.emit(&AppEvent::PatternFinished(cmd));
            }
            Err(id) => {
                warn!("executor: unrecognized command {} — skipping", id);
                sink.emit(&AppEvent::UnknownCommand(id));
            }
        }

        self.state = ExecutorState::Releasing;
        drop(claim);
        sink.emit(&AppEvent::ActuatorsReleased);
        self.state = ExecutorState::Idle;
        debug!("executor: idle");
    }

    /// Finite blink burst: `blink_count` on/off cycles with a fixed
    /// delay between edges.
    fn blink(
        led: LedId,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
        config: &SystemConfig,
    ) {
        for _ in 0..config.blink_count {
            hw.set_output(led, true);
            delay.delay_ms(config.blink_interval_ms);
            hw.set_output(led, false);
            delay.delay_ms(config.blink_interval_ms);
        }
    }

    /// Full PWM sweep: 0 → 100 → 0 percent in `sweep_step_percent`
    /// increments, one delay per step. Ends with the duty at zero.
    fn sweep(hw: &mut impl ActuatorPort, delay: &mut impl DelayPort, config: &SystemConfig) {
        let step = config.sweep_step_percent;
        let mut percent: u8 = 0;
        loop {
            hw.set_pwm_percent(percent);
            delay.delay_ms(config.sweep_step_delay_ms);
            if percent >= 100 {
                break;
            }
            percent += step;
        }
        while percent > 0 {
            percent -= step;
            hw.set_pwm_percent(percent);
            delay.delay_ms(config.sweep_step_delay_ms);
        }
    }
}
