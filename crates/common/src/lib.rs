//! Shared utilities for the Larkbridge crates.
//!
//! - `time`: clock abstraction (system and mock)
//! - `resilience`: pacing policies for sequential dispatch
//!
//! Enable the `test-utils` feature to get [`time::MockClock`] outside this
//! crate's own tests.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod resilience;
pub mod time;

pub use resilience::{FixedInterval, NoPacing, PacingPolicy};
pub use time::{Clock, SystemClock};
