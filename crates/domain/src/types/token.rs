//! Tenant access token with its issue time

use std::fmt;
use std::time::{Duration, Instant};

/// A tenant access token together with the instant it was issued.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    issued_at: Instant,
    ttl: Duration,
}

impl AccessToken {
    /// Token issued at `issued_at`, valid for `ttl`.
    pub fn new(value: impl Into<String>, issued_at: Instant, ttl: Duration) -> Self {
        Self { value: value.into(), issued_at, ttl }
    }

    /// Raw token value.
    pub fn secret(&self) -> &str {
        &self.value
    }

    /// When the token was obtained.
    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    /// How long the token is reused.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Expired once its age reaches the TTL.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= self.ttl
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_at_ttl() {
        let issued = Instant::now();
        let token = AccessToken::new("t-abc", issued, Duration::from_secs(3600));

        assert!(!token.is_expired(issued));
        assert!(!token.is_expired(issued + Duration::from_secs(3599)));
        assert!(token.is_expired(issued + Duration::from_secs(3600)));
    }

    #[test]
    fn bearer_header_and_redacted_debug() {
        let token = AccessToken::new("t-abc", Instant::now(), Duration::from_secs(60));

        assert_eq!(token.bearer(), "Bearer t-abc");
        assert!(!format!("{token:?}").contains("t-abc"));
    }
}
