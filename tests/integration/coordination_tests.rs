//! Cross-task coordination tests.
//!
//! These run the real tasks, notifier, queue, and pause machinery on
//! host threads, observing actuator state through the in-memory panel
//! simulation in `drivers::hw_init`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use blinkpanel::adapters::hardware::HardwareAdapter;
use blinkpanel::app::commands::PatternCommand;
use blinkpanel::app::events::AppEvent;
use blinkpanel::app::executor::PatternExecutor;
use blinkpanel::config::SystemConfig;
use blinkpanel::context::wire;
use blinkpanel::drivers::leds::LedDriver;
use blinkpanel::drivers::pwm::PwmDriver;
use blinkpanel::drivers::{button_isr, hw_init};
use blinkpanel::pins;
use blinkpanel::sync::pause::{ActuatorGate, PausePoint, pause_pair};
use blinkpanel::tasks;

use crate::mock_panel::{EventLog, NoDelay};

/// The simulated panel state is process-global; tests that read or
/// write it must not interleave.
static HW_LOCK: Mutex<()> = Mutex::new(());

fn wait_until(deadline_ms: u64, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(deadline_ms);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}

/// Checkpoint-only stand-in for a periodic task: parkable by the gate
/// but touches no hardware, so tests can hold a claim without live
/// actuation in the background.
fn spawn_parkable(point: PausePoint, stop: Arc<AtomicBool>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            point.checkpoint();
            std::thread::sleep(Duration::from_millis(1));
        }
    })
}

// ── Notifier → button task → queue ────────────────────────────

#[test]
fn presses_become_commands_in_cycle_order() {
    let config = SystemConfig {
        queue_capacity: 2,
        ..SystemConfig::default()
    };
    let (ctx, wiring) = wire(&config);

    let notifier = Arc::clone(&ctx.notifier);
    let stats = Arc::clone(&ctx.stats);
    {
        let cfg = config.clone();
        let tx = wiring.commands_tx;
        let ready = wiring.button_ready_tx;
        let n = Arc::clone(&notifier);
        let s = Arc::clone(&stats);
        std::thread::spawn(move || tasks::button_task(n, tx, ready, s, cfg));
    }
    wiring
        .button_ready_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("button task ready");

    // Five spaced presses: each wakes the task separately, and the
    // bounded queue (capacity 2) blocks the producer until we drain.
    let presser = {
        let notifier = Arc::clone(&notifier);
        std::thread::spawn(move || {
            for _ in 0..5 {
                notifier.signal_from_isr();
                std::thread::sleep(Duration::from_millis(20));
            }
        })
    };

    let mut received = Vec::new();
    for _ in 0..5 {
        received.push(
            wiring
                .commands_rx
                .recv_timeout(Duration::from_secs(2))
                .expect("command within deadline"),
        );
    }
    presser.join().unwrap();

    // Cursor starts at GreenBlink, so the first press selects PwmSweep.
    assert_eq!(received, vec![1, 2, 0, 1, 2]);
    assert!(wait_until(1_000, || {
        stats.presses_handled.load(Ordering::Relaxed) == 5
    }));
}

#[test]
fn burst_while_producer_blocked_coalesces() {
    // Capacity 1 wedges the button task on its second send; a burst
    // fired while it is blocked must coalesce into a single further
    // command, not one per edge.
    let config = SystemConfig {
        queue_capacity: 1,
        ..SystemConfig::default()
    };
    let (ctx, wiring) = wire(&config);

    let notifier = Arc::clone(&ctx.notifier);
    {
        let cfg = config.clone();
        let tx = wiring.commands_tx;
        let ready = wiring.button_ready_tx;
        let n = Arc::clone(&notifier);
        let s = Arc::clone(&ctx.stats);
        std::thread::spawn(move || tasks::button_task(n, tx, ready, s, cfg));
    }
    wiring
        .button_ready_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("button task ready");

    // Press 1 fills the queue; press 2 blocks the task on send.
    notifier.signal_from_isr();
    std::thread::sleep(Duration::from_millis(50));
    notifier.signal_from_isr();
    std::thread::sleep(Duration::from_millis(50));

    // Ten edges while the producer is wedged: all pend on the notifier.
    for _ in 0..10 {
        notifier.signal_from_isr();
    }

    let mut received = Vec::new();
    while let Ok(raw) = wiring.commands_rx.recv_timeout(Duration::from_millis(300)) {
        received.push(raw);
    }

    // Two spaced presses plus one command for the whole burst.
    assert_eq!(received, vec![1, 2, 0]);
}

// ── Pause gate vs. live periodic tasks ────────────────────────

#[test]
fn claimed_panel_freezes_periodic_actuation() {
    let _hw = HW_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let (green_point, green_handle) = pause_pair("green");
    let (fade_point, fade_handle) = pause_pair("fade");
    let gate = ActuatorGate::new(vec![green_handle, fade_handle]);

    let stop = Arc::new(AtomicBool::new(false));
    let green = {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut led = LedDriver::new(pins::GREEN_LED_GPIO);
            while !stop.load(Ordering::Relaxed) {
                green_point.checkpoint();
                led.toggle();
                std::thread::sleep(Duration::from_millis(2));
            }
        })
    };
    let fade = {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut pwm = PwmDriver::new();
            while !stop.load(Ordering::Relaxed) {
                fade_point.checkpoint();
                pwm.fade_step(10);
                std::thread::sleep(Duration::from_millis(2));
            }
        })
    };

    assert!(wait_until(1_000, || hw_init::ledc_duty() > 0));

    {
        let _claim = gate.acquire();
        assert!(gate.all_parked());

        // No actuator may move while the claim is held.
        let duty = hw_init::ledc_duty();
        let led = hw_init::gpio_state(pins::GREEN_LED_GPIO);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(hw_init::ledc_duty(), duty);
        assert_eq!(hw_init::gpio_state(pins::GREEN_LED_GPIO), led);
    }

    // Released: the fade ramp moves again.
    let duty = hw_init::ledc_duty();
    assert!(wait_until(1_000, || hw_init::ledc_duty() != duty));

    stop.store(true, Ordering::Relaxed);
    green.join().unwrap();
    fade.join().unwrap();
}

// ── End-to-end: ISR edge → pattern completion ─────────────────

#[test]
fn press_flows_from_isr_to_finished_pattern() {
    let _hw = HW_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let config = SystemConfig::default();
    let (ctx, wiring) = wire(&config);

    // Parkable stand-ins on the wired pause points so the executor's
    // claim has real tasks to rendezvous with.
    let stop = Arc::new(AtomicBool::new(false));
    let workers = vec![
        spawn_parkable(wiring.green_pause, Arc::clone(&stop)),
        spawn_parkable(wiring.red_pause, Arc::clone(&stop)),
        spawn_parkable(wiring.fade_pause, Arc::clone(&stop)),
    ];

    button_isr::install(Arc::clone(&ctx.notifier)).expect("isr install");

    {
        let cfg = config.clone();
        let tx = wiring.commands_tx;
        let ready = wiring.button_ready_tx;
        let n = Arc::clone(&ctx.notifier);
        let s = Arc::clone(&ctx.stats);
        std::thread::spawn(move || tasks::button_task(n, tx, ready, s, cfg));
    }
    // The edge fires only after the consumer rendezvous, mirroring the
    // bootstrap ordering, so it cannot be dropped.
    wiring
        .button_ready_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("button task ready");

    button_isr::simulate_press();

    let raw = wiring
        .commands_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("press produces a command");
    assert_eq!(raw, PatternCommand::PwmSweep.id());

    let mut exec = PatternExecutor::new();
    let mut hw = HardwareAdapter::new();
    let mut delay = NoDelay::default();
    let mut log = EventLog::default();
    exec.run(raw, &ctx.gate, &mut hw, &mut delay, &mut log, &config);

    assert!(
        log.events
            .contains(&AppEvent::PatternFinished(PatternCommand::PwmSweep))
    );
    // The sweep ends dark, and the tasks are running again.
    assert_eq!(hw_init::ledc_duty(), 0);
    assert!(!ctx.gate.all_parked());
    assert_eq!(button_isr::unwired_edges(), 0);

    stop.store(true, Ordering::Relaxed);
    for w in workers {
        w.join().unwrap();
    }
}
