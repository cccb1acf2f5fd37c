//! Unified error types for the BlinkPanel firmware.
//!
//! Follows embedded practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level bootstrap's error handling
//! uniform. All variants are `Copy` so they can be cheaply passed around
//! without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

/// Every fallible operation in the firmware funnels into this type.
///
/// Both variants are startup errors and fatal: the system halts rather
/// than run with a partially wired coordination core. Runtime
/// conditions — notification timeouts, unrecognized commands, a full
/// queue — are ordinary control flow and never reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
