//! Observability subsystem.
//!
//! Library code emits `tracing` events; the binary decides where they go.

pub mod logging;

pub use logging::init_logging;
