//! Configuration structures
//!
//! Every section except `credentials` has defaults, so a config file only
//! needs to carry the app id and secret.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APP_ENV, DEFAULT_APP_NAME, DEFAULT_BASE_URI, DEFAULT_BATCH_PAUSE_MS,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_SECS,
    MAX_RECORDS_PER_CHUNK,
};
use crate::{Credentials, LarkError, Result};

/// Complete gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LarkConfig {
    /// App id and secret.
    pub credentials: Credentials,
    /// Open API root, e.g. `https://open.larksuite.com/open-apis/`.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
    /// Token lifetime.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Batch-create chunking and pacing.
    #[serde(default)]
    pub bulk: BulkConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Notification identity.
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl LarkConfig {
    /// Config with default sections for the given credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_uri: default_base_uri(),
            auth: AuthConfig::default(),
            bulk: BulkConfig::default(),
            http: HttpConfig::default(),
            notification: NotificationConfig::default(),
        }
    }

    /// Checks that do not need network or URL parsing.
    ///
    /// # Errors
    /// Returns `LarkError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.credentials.is_complete() {
            return Err(LarkError::Config("app_id and app_secret must both be set".into()));
        }
        if self.base_uri.trim().is_empty() {
            return Err(LarkError::Config("base_uri must not be empty".into()));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(LarkError::Config("token_ttl_secs must be positive".into()));
        }
        if !(1..=MAX_RECORDS_PER_CHUNK).contains(&self.bulk.chunk_size) {
            return Err(LarkError::Config(format!(
                "chunk_size must be between 1 and {MAX_RECORDS_PER_CHUNK}, got {}",
                self.bulk.chunk_size
            )));
        }
        Ok(())
    }
}

/// Tenant token settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Seconds a token is reused before refreshing.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Token lifetime as a [`Duration`].
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_ttl_secs: DEFAULT_TOKEN_TTL_SECS }
    }
}

/// Batch-create settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Pause between chunks in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    /// Records per request, at most 1000.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl BulkConfig {
    /// Pause as a [`Duration`].
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self { pause_ms: DEFAULT_BATCH_PAUSE_MS, chunk_size: MAX_RECORDS_PER_CHUNK }
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            system_proxy: true,
        }
    }
}

/// Identity stamped into notification titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Application name, capitalized in titles.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Deployment environment.
    #[serde(default = "default_app_env")]
    pub app_env: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { app_name: default_app_name(), app_env: default_app_env() }
    }
}

fn default_base_uri() -> String {
    DEFAULT_BASE_URI.to_string()
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_pause_ms() -> u64 {
    DEFAULT_BATCH_PAUSE_MS
}

fn default_chunk_size() -> usize {
    MAX_RECORDS_PER_CHUNK
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_system_proxy() -> bool {
    true
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_app_env() -> String {
    DEFAULT_APP_ENV.to_string()
}
