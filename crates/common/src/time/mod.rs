//! Time utilities

pub mod clock;

#[cfg(any(feature = "test-utils", test))]
pub use clock::MockClock;
pub use clock::{Clock, SystemClock};
