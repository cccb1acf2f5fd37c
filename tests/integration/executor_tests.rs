//! Pattern executor integration tests.
//!
//! Drive the executor against the mock panel and real pause machinery
//! (with live worker threads standing in for the periodic tasks) and
//! assert on the full actuation/event history.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use blinkpanel::app::commands::PatternCommand;
use blinkpanel::app::events::AppEvent;
use blinkpanel::app::executor::PatternExecutor;
use blinkpanel::app::ports::LedId;
use blinkpanel::config::SystemConfig;
use blinkpanel::sync::pause::{ActuatorGate, PausePoint, pause_pair};

use crate::mock_panel::{ActuatorCall, EventLog, MockPanel, NoDelay};

/// Bounded stand-in for a periodic actuator task: counts iterations
/// until told to stop.
fn spawn_worker(
    point: PausePoint,
    iterations: Arc<AtomicU32>,
    stop: Arc<AtomicU32>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while stop.load(Ordering::Relaxed) == 0 {
            point.checkpoint();
            iterations.fetch_add(1, Ordering::Relaxed);
            std::thread::sleep(Duration::from_millis(1));
        }
    })
}

#[test]
fn pattern_parks_workers_and_resumes_them() {
    let (p1, h1) = pause_pair("worker-1");
    let (p2, h2) = pause_pair("worker-2");
    let gate = ActuatorGate::new(vec![h1, h2]);

    let iters1 = Arc::new(AtomicU32::new(0));
    let iters2 = Arc::new(AtomicU32::new(0));
    let stop = Arc::new(AtomicU32::new(0));
    let w1 = spawn_worker(p1, Arc::clone(&iters1), Arc::clone(&stop));
    let w2 = spawn_worker(p2, Arc::clone(&iters2), Arc::clone(&stop));
    std::thread::sleep(Duration::from_millis(10));

    let mut exec = PatternExecutor::new();
    let mut panel = MockPanel::new();
    let mut delay = NoDelay::default();
    let mut log = EventLog::default();
    let config = SystemConfig::default();

    exec.run(
        PatternCommand::GreenBlink.id(),
        &gate,
        &mut panel,
        &mut delay,
        &mut log,
        &config,
    );

    // The script ran with both workers parked, and both resumed after.
    assert!(!gate.all_parked());
    let before1 = iters1.load(Ordering::Relaxed);
    let before2 = iters2.load(Ordering::Relaxed);
    std::thread::sleep(Duration::from_millis(20));
    assert!(iters1.load(Ordering::Relaxed) > before1);
    assert!(iters2.load(Ordering::Relaxed) > before2);

    stop.store(1, Ordering::Relaxed);
    w1.join().unwrap();
    w2.join().unwrap();

    // Event ordering around the script.
    assert_eq!(
        log.events,
        vec![
            AppEvent::ActuatorsClaimed,
            AppEvent::PatternStarted(PatternCommand::GreenBlink),
            AppEvent::PatternFinished(PatternCommand::GreenBlink),
            AppEvent::ActuatorsReleased,
        ]
    );
}

#[test]
fn green_blink_script_history() {
    let mut exec = PatternExecutor::new();
    let mut panel = MockPanel::new();
    let mut delay = NoDelay::default();
    let mut log = EventLog::default();
    let config = SystemConfig::default();

    exec.run(
        PatternCommand::GreenBlink.id(),
        &ActuatorGate::new(Vec::new()),
        &mut panel,
        &mut delay,
        &mut log,
        &config,
    );

    // Safe state first, then blink_count on/off pairs, ending off.
    assert_eq!(panel.calls[0], ActuatorCall::AllOff);
    let toggles: Vec<_> = panel
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::SetOutput { .. }))
        .collect();
    assert_eq!(toggles.len() as u32, config.blink_count * 2);
    assert!(!panel.led_on(LedId::Green));
    // One delay per edge.
    assert_eq!(
        delay.total_ms,
        u64::from(config.blink_count * 2 * config.blink_interval_ms)
    );
}

#[test]
fn sweep_script_ends_dark() {
    let mut exec = PatternExecutor::new();
    let mut panel = MockPanel::new();
    let mut delay = NoDelay::default();
    let mut log = EventLog::default();
    let config = SystemConfig::default();

    exec.run(
        PatternCommand::PwmSweep.id(),
        &ActuatorGate::new(Vec::new()),
        &mut panel,
        &mut delay,
        &mut log,
        &config,
    );

    let history = panel.percent_history();
    assert_eq!(history.first(), Some(&0));
    assert_eq!(history.iter().max(), Some(&100));
    assert_eq!(history.last(), Some(&0));
    // 0..=100 up plus 90..=0 down at 10% steps.
    assert_eq!(history.len(), 21);
}

#[test]
fn back_to_back_commands_each_complete() {
    let mut exec = PatternExecutor::new();
    let mut panel = MockPanel::new();
    let mut delay = NoDelay::default();
    let mut log = EventLog::default();
    let config = SystemConfig::default();
    let gate = ActuatorGate::new(Vec::new());

    for raw in [0u8, 1, 2, 7] {
        exec.run(raw, &gate, &mut panel, &mut delay, &mut log, &config);
    }

    let finished: Vec<_> = log
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::PatternFinished(_)))
        .collect();
    assert_eq!(finished.len(), 3);
    assert!(log.events.contains(&AppEvent::UnknownCommand(7)));
    // Every run releases, known command or not.
    let releases = log
        .events
        .iter()
        .filter(|e| **e == AppEvent::ActuatorsReleased)
        .count();
    assert_eq!(releases, 4);
}
