//! Pacing policies for sequential request dispatch
//!
//! The Lark open platform enforces a per-app request ceiling. Bulk writers
//! dispatch one request at a time and call [`PacingPolicy::pause`] between
//! consecutive requests. The policy decides how long to wait.
//!
//! - [`FixedInterval`]: waits a constant interval (production default: 1s)
//! - [`NoPacing`]: returns immediately (tests, local mocks)

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Default pause between bulk dispatches.
pub const DEFAULT_PACING_INTERVAL: Duration = Duration::from_secs(1);

/// Strategy invoked between two consecutive outbound requests.
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Wait before the next request is dispatched.
    async fn pause(&self);

    /// Human-readable name for logs.
    fn name(&self) -> &'static str;
}

/// Constant delay between dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    /// Create a policy that sleeps `interval` between dispatches.
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Configured interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_INTERVAL)
    }
}

#[async_trait]
impl PacingPolicy for FixedInterval {
    async fn pause(&self) {
        if self.interval.is_zero() {
            return;
        }
        debug!(interval_ms = self.interval.as_millis() as u64, "pacing before next dispatch");
        tokio::time::sleep(self.interval).await;
    }

    fn name(&self) -> &'static str {
        "fixed_interval"
    }
}

/// Zero-delay policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl PacingPolicy for NoPacing {
    async fn pause(&self) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn default_interval_is_one_second() {
        assert_eq!(FixedInterval::default().interval(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn fixed_interval_waits_at_least_the_interval() {
        let policy = FixedInterval::new(Duration::from_millis(20));
        let started = Instant::now();

        policy.pause().await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn zero_interval_returns_immediately() {
        let policy = FixedInterval::new(Duration::ZERO);
        let started = Instant::now();

        policy.pause().await;

        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn no_pacing_is_usable_as_trait_object() {
        let policy: Box<dyn PacingPolicy> = Box::new(NoPacing);
        policy.pause().await;
        assert_eq!(policy.name(), "none");
    }
}
