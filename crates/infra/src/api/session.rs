//! Tenant token cache and transport lifecycle
//!
//! An [`AuthSession`] holds at most one token. The first call, or the first
//! call after the token's age reaches its TTL, asks the [`TokenIssuer`] for a
//! new one and builds a fresh [`AuthenticatedTransport`] around it. The state
//! lock is held across the refresh, so concurrent callers share one request.

use std::sync::Arc;
use std::time::Duration;

use larkbridge_common::time::{Clock, SystemClock};
use larkbridge_core::ports::TokenIssuer;
use larkbridge_domain::constants::DEFAULT_TOKEN_TTL_SECS;
use larkbridge_domain::{AccessToken, Credentials, HttpConfig, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::transport::{with_trailing_slash, AuthenticatedTransport};

struct SessionState {
    token: AccessToken,
    transport: Arc<AuthenticatedTransport>,
}

/// Per-client authentication state.
pub struct AuthSession {
    credentials: Credentials,
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    base_uri: Url,
    http: HttpConfig,
    state: Mutex<Option<SessionState>>,
}

impl AuthSession {
    /// Unauthenticated session using the system clock and a 1 hour TTL.
    pub fn new(
        credentials: Credentials,
        issuer: Arc<dyn TokenIssuer>,
        base_uri: Url,
        http: HttpConfig,
    ) -> Self {
        Self {
            credentials,
            issuer,
            clock: Arc::new(SystemClock),
            ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            base_uri: with_trailing_slash(base_uri),
            http,
            state: Mutex::new(None),
        }
    }

    /// Read token age from `clock`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reuse tokens for `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Transport carrying a valid token, authenticating first if needed.
    ///
    /// # Errors
    /// `Authentication` when the issuer fails. Nothing is cached in that
    /// case and the next call tries again.
    #[instrument(skip_all, fields(app_id = %self.credentials.app_id))]
    pub async fn transport(&self) -> Result<Arc<AuthenticatedTransport>> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(current) = state.as_ref() {
            if !current.token.is_expired(now) {
                return Ok(Arc::clone(&current.transport));
            }
            let age = now.saturating_duration_since(current.token.issued_at());
            debug!(age_secs = age.as_secs(), "tenant token expired");
        }

        let secret = match self.issuer.issue(&self.credentials).await {
            Ok(secret) => secret,
            Err(err) => {
                *state = None;
                warn!(error = %err, error_type = err.label(), "authentication failed");
                return Err(err);
            }
        };

        let token = AccessToken::new(secret, self.clock.now(), self.ttl);
        let transport =
            Arc::new(AuthenticatedTransport::new(self.base_uri.clone(), &token, &self.http)?);
        *state = Some(SessionState { token, transport: Arc::clone(&transport) });

        info!(ttl_secs = self.ttl.as_secs(), "tenant access token refreshed");
        Ok(transport)
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.state.lock().await = None;
        debug!("tenant token invalidated");
    }

    /// Whether a non-expired token is cached.
    pub async fn is_authenticated(&self) -> bool {
        let now = self.clock.now();
        self.state.lock().await.as_ref().is_some_and(|state| !state.token.is_expired(now))
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("credentials", &self.credentials)
            .field("ttl", &self.ttl)
            .field("base_uri", &self.base_uri.as_str())
            .finish_non_exhaustive()
    }
}
