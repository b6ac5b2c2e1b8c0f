//! Time abstraction for testability
//!
//! Token expiry and pacing decisions read time through [`Clock`] so tests can
//! move time forward without sleeping.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use larkbridge_common::time::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let start = clock.now();
//! assert!(clock.now().duration_since(start) < Duration::from_secs(1));
//! ```

use std::time::Instant;

#[cfg(any(feature = "test-utils", test))]
use std::sync::Arc;
#[cfg(any(feature = "test-utils", test))]
use std::time::Duration;

#[cfg(any(feature = "test-utils", test))]
use parking_lot::Mutex;

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    /// Monotonic timestamp suitable for measuring token age.
    fn now(&self) -> Instant;
}

/// Real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same elapsed time, so a clone handed to an
/// `AuthSession` observes every `advance` made through any other clone.
///
/// ```ignore
/// use std::time::Duration;
///
/// use larkbridge_common::time::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(3600));
/// assert_eq!(clock.now().duration_since(start), Duration::from_secs(3600));
/// ```
#[cfg(any(feature = "test-utils", test))]
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

#[cfg(any(feature = "test-utils", test))]
impl MockClock {
    /// Create a mock clock anchored at the current real time.
    pub fn new() -> Self {
        Self { start: Instant::now(), elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Simulate `duration` passing.
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Total simulated time since creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

#[cfg(any(feature = "test-utils", test))]
impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(feature = "test-utils", test))]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock()
    }
}
