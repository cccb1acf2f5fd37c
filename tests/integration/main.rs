//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters or the in-memory panel simulation. All tests
//! run on the host (x86_64) with no real hardware required.

mod coordination_tests;
mod executor_tests;
mod mock_panel;
