//! Lark API client facade
//!
//! [`LarkClient`] owns an [`AuthSession`] and implements the core
//! [`ApiTransport`] port by fetching the session's current transport for
//! every request, so token refresh stays invisible to the services built on
//! top of it.

use std::sync::Arc;

use async_trait::async_trait;
use larkbridge_common::resilience::FixedInterval;
use larkbridge_core::endpoint::{actions, EndpointCatalog};
use larkbridge_core::ports::{ApiTransport, TokenIssuer};
use larkbridge_core::ApiContext;
use larkbridge_domain::{LarkConfig, LarkError, Result};
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;

use super::auth::TenantTokenIssuer;
use super::session::AuthSession;
use super::transport::with_trailing_slash;
use crate::config::parse_base_uri;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Authenticated client for the Lark open platform.
#[derive(Debug, Clone)]
pub struct LarkClient {
    session: Arc<AuthSession>,
}

impl LarkClient {
    /// Client over an existing session.
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    /// Build the issuer and session described by `config`. No request is
    /// made until the first call.
    ///
    /// # Errors
    /// `Config` for invalid settings or an unusable base URI.
    pub fn from_config(config: &LarkConfig, catalog: &EndpointCatalog) -> Result<Self> {
        config.validate()?;
        let base = parse_base_uri(&config.base_uri)?;

        let token_path = catalog.resolve(actions::TENANT_TOKEN, &[])?;
        let token_url = join(&base, &token_path)?;
        let issuer: Arc<dyn TokenIssuer> =
            Arc::new(TenantTokenIssuer::new(HttpClient::from_config(&config.http)?, token_url));

        let session =
            AuthSession::new(config.credentials.clone(), issuer, base, config.http.clone())
                .with_ttl(config.auth.token_ttl());

        Ok(Self::new(Arc::new(session)))
    }

    /// Authenticate eagerly and return a context ready for the resource
    /// services.
    ///
    /// # Errors
    /// `Config` for invalid settings, `Authentication` if the first token
    /// request fails.
    #[instrument(skip_all, fields(app_id = %config.credentials.app_id))]
    pub async fn connect(config: &LarkConfig) -> Result<ApiContext> {
        let catalog = Arc::new(EndpointCatalog::lark_default()?);
        let client = Self::from_config(config, &catalog)?;
        client.authenticate().await?;
        info!(base_uri = %config.base_uri, "connected to Lark");
        client.into_context(config, catalog)
    }

    /// Obtain a token now instead of on first request.
    ///
    /// # Errors
    /// `Authentication` when the token request fails.
    pub async fn authenticate(&self) -> Result<()> {
        self.session.transport().await.map(|_| ())
    }

    /// Underlying authentication state.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Wrap this client in an [`ApiContext`] using the bulk and notification
    /// settings from `config`.
    ///
    /// # Errors
    /// `InvalidInput` if the configured chunk size is out of range.
    pub fn into_context(
        self,
        config: &LarkConfig,
        catalog: Arc<EndpointCatalog>,
    ) -> Result<ApiContext> {
        ApiContext::new(Arc::new(self), catalog)
            .with_pacing(Arc::new(FixedInterval::new(config.bulk.pause())))
            .with_notification(config.notification.clone())
            .with_chunk_size(config.bulk.chunk_size)
    }
}

#[async_trait]
impl ApiTransport for LarkClient {
    async fn get(&self, path: &str) -> Result<Value> {
        self.session.transport().await?.get(path).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.session.transport().await?.post(path, body).await
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    with_trailing_slash(base.clone())
        .join(path)
        .map_err(|err| LarkError::from(InfraError::from(err)))
}
