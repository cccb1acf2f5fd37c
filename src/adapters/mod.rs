//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements     | Connects to              |
//! |------------|----------------|--------------------------|
//! | `hardware` | ActuatorPort   | panel GPIO + LEDC drivers|
//! | `delay`    | DelayPort      | thread sleep             |
//! | `log_sink` | EventSink      | serial log output        |

pub mod delay;
pub mod hardware;
pub mod log_sink;
