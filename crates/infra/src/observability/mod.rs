//! Observability infrastructure
//!
//! Only log setup lives here; every crate emits through `tracing` macros
//! with structured fields.

pub mod logging;

pub use logging::{init_tracing, LoggingConfig};
