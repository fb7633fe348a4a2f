//! Observability setup for RocketShoes binaries.
//!
//! Library crates only emit `tracing` events; binaries call
//! [`init_logging`] once at startup to decide where those events go.

mod logging;

pub use logging::*;
