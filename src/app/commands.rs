//! Pattern commands and the button-driven pattern cursor.
//!
//! The command queue carries the raw `u8` identifier rather than the
//! enum; decoding at the consumer is what gives the executor a real
//! unrecognized-command path.

/// The scripted patterns the executor can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternCommand {
    /// Finite blink burst on the green LED.
    GreenBlink = 0,
    /// Full ramp-up-then-down sweep on the PWM LED.
    PwmSweep = 1,
    /// Finite blink burst on the red LED.
    RedBlink = 2,
}

impl PatternCommand {
    /// Size of the command domain. The cursor cycles modulo this.
    pub const COUNT: u8 = 3;

    /// Wire identifier carried on the command queue.
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PatternCommand {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, u8> {
        match raw {
            0 => Ok(Self::GreenBlink),
            1 => Ok(Self::PwmSweep),
            2 => Ok(Self::RedBlink),
            other => Err(other),
        }
    }
}

/// Deterministic pattern cursor, locally owned by the button task.
///
/// Holds the last-emitted identifier, initially 0; each qualifying
/// press advances it modulo the command domain *before* emitting, so
/// the first press emits `1`. Coalesced notifications advance the
/// cursor once, not once per edge — the coalesced count is discarded.
#[derive(Debug, Default)]
pub struct PatternCursor {
    last: u8,
}

impl PatternCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next pattern identifier and return it.
    pub fn advance(&mut self) -> u8 {
        self.last = (self.last + 1) % PatternCommand::COUNT;
        self.last
    }
}
