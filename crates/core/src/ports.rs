//! Port interfaces for the Lark API
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use larkbridge_domain::{Credentials, Result};
use serde_json::Value;

/// Authenticated JSON transport relative to the configured base URI.
///
/// Implementations decode every response body to JSON (an empty body is
/// `{}`) and do not interpret HTTP status codes.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

/// Exchanges application credentials for a tenant access token.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Returns the raw token string.
    ///
    /// # Errors
    /// `LarkError::Authentication` when no usable token was issued.
    async fn issue(&self, credentials: &Credentials) -> Result<String>;
}
