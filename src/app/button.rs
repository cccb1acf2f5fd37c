//! Button controller — the pure per-wakeup step of the button task.
//!
//! The task loop (in [`tasks`](crate::tasks)) blocks on the notifier
//! and feeds the result here; this module owns the cursor and decides
//! whether a command is emitted.

use core::num::NonZeroU32;

use log::debug;

use super::commands::PatternCursor;

/// Cursor-owning controller driven by the button task.
#[derive(Debug, Default)]
pub struct ButtonController {
    cursor: PatternCursor,
}

impl ButtonController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one wakeup of the button task.
    ///
    /// `notified` is the coalesced count taken from the notifier, or
    /// `None` on timeout. A timeout produces nothing and changes
    /// nothing. A nonzero count advances the cursor exactly once —
    /// rapid presses coalesced into one wakeup select one pattern, not
    /// one per edge — and yields the identifier to enqueue.
    pub fn poll(&mut self, notified: Option<NonZeroU32>) -> Option<u8> {
        let count = notified?;
        let id = self.cursor.advance();
        debug!("button: {} edge(s) coalesced, next pattern {}", count, id);
        Some(id)
    }
}
