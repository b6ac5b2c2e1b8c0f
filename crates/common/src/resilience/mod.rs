//! Resilience patterns for talking to rate-limited remote APIs
//!
//! Only request pacing lives here. Retry and backoff are left to
//! callers of the gateway.

pub mod pacing;

pub use pacing::{FixedInterval, NoPacing, PacingPolicy, DEFAULT_PACING_INTERVAL};
