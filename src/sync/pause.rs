//! Cooperative suspend/resume for the periodic actuator tasks.
//!
//! The pattern executor needs exclusive write access to actuator state
//! that the periodic tasks normally own. Instead of a mutex per
//! actuator, ownership transfers wholesale: the executor pauses every
//! periodic task, runs its script, and resumes them. Each periodic task
//! carries a [`PausePoint`] and calls [`PausePoint::checkpoint`] at the
//! top of every loop iteration; the executor holds the matching
//! [`PauseHandle`]s through an [`ActuatorGate`].
//!
//! [`PauseHandle::suspend`] is a rendezvous: it returns only once the
//! target task is actually parked at its checkpoint. A task caught
//! mid-sleep is picked up at its next checkpoint, so suspension latency
//! is bounded by the longest task period. The rendezvous is what makes
//! the protocol a valid substitute for locking — once `acquire()`
//! returns, no periodic task can be between a checkpoint and an
//! actuator write.
//!
//! Handles are `Arc`-backed, so a dangling task handle — resuming or
//! suspending a task that no longer exists — is unrepresentable.

use std::sync::{Arc, Condvar, Mutex, PoisonError};

use log::debug;

#[derive(Default)]
struct PauseState {
    /// Set by the suspender; the task must park while this holds.
    pause_requested: bool,
    /// Set by the task once it is blocked inside its checkpoint.
    parked: bool,
}

struct Shared {
    state: Mutex<PauseState>,
    cv: Condvar,
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, PauseState> {
        // A panicking peer must not wedge the coordination layer.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Task-side end of a pause pair. Owned by one periodic task.
pub struct PausePoint {
    shared: Arc<Shared>,
}

/// Suspender-side end of a pause pair.
pub struct PauseHandle {
    shared: Arc<Shared>,
    label: &'static str,
}

/// Create a connected checkpoint/handle pair for one periodic task.
pub fn pause_pair(label: &'static str) -> (PausePoint, PauseHandle) {
    let shared = Arc::new(Shared {
        state: Mutex::new(PauseState::default()),
        cv: Condvar::new(),
    });
    (
        PausePoint {
            shared: Arc::clone(&shared),
        },
        PauseHandle { shared, label },
    )
}

impl PausePoint {
    /// Pause checkpoint. Call at the top of every task loop iteration.
    ///
    /// Returns immediately when no pause is in force; otherwise parks
    /// the task until [`PauseHandle::resume`] is called. The task's
    /// actuator writes must all happen downstream of this call.
    pub fn checkpoint(&self) {
        let mut st = self.shared.lock();
        while st.pause_requested {
            st.parked = true;
            self.shared.cv.notify_all();
            st = self
                .shared
                .cv
                .wait(st)
                .unwrap_or_else(PoisonError::into_inner);
        }
        // Only the task itself may clear `parked`, and only while it
        // holds the lock with no pause in force.
        st.parked = false;
    }
}

impl PauseHandle {
    /// Diagnostic label of the task this handle controls.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Request a pause and block until the task is parked.
    ///
    /// Latency is bounded by the task's sleep period: a task mid-sleep
    /// parks at its next checkpoint.
    pub fn suspend(&self) {
        let mut st = self.shared.lock();
        st.pause_requested = true;
        while !st.parked {
            st = self
                .shared
                .cv
                .wait(st)
                .unwrap_or_else(PoisonError::into_inner);
        }
        debug!("pause: '{}' parked", self.label);
    }

    /// Release the pause and wake the parked task.
    pub fn resume(&self) {
        let mut st = self.shared.lock();
        st.pause_requested = false;
        self.shared.cv.notify_all();
        debug!("pause: '{}' resumed", self.label);
    }

    /// Whether the task is currently parked. Diagnostic only.
    pub fn is_parked(&self) -> bool {
        self.shared.lock().parked
    }
}

// ───────────────────────────────────────────────────────────────
// ActuatorGate
// ───────────────────────────────────────────────────────────────

/// Exclusive-access token over the full set of periodic actuator tasks.
///
/// Suspension order is fixed and deterministic (construction order).
/// Order does not matter for correctness — suspension is task-level,
/// not lock-level — but a consistent order keeps diagnostics readable.
pub struct ActuatorGate {
    handles: Vec<PauseHandle>,
}

impl ActuatorGate {
    pub fn new(handles: Vec<PauseHandle>) -> Self {
        Self { handles }
    }

    /// Suspend every periodic task, in order, and return a claim whose
    /// drop resumes them (reverse order).
    pub fn acquire(&self) -> ActuatorClaim<'_> {
        for h in &self.handles {
            h.suspend();
        }
        debug!("gate: all {} periodic tasks parked", self.handles.len());
        ActuatorClaim { gate: self }
    }

    /// Whether every controlled task is currently parked.
    pub fn all_parked(&self) -> bool {
        self.handles.iter().all(PauseHandle::is_parked)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Guard over exclusive actuator access. Dropping it resumes the
/// suspended tasks.
#[must_use = "dropping the claim immediately resumes the periodic tasks"]
pub struct ActuatorClaim<'a> {
    gate: &'a ActuatorGate,
}

impl Drop for ActuatorClaim<'_> {
    fn drop(&mut self) {
        for h in self.gate.handles.iter().rev() {
            h.resume();
        }
        debug!("gate: all periodic tasks resumed");
    }
}
