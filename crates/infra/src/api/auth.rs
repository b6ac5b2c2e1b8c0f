//! Tenant access token acquisition
//!
//! Calls `auth/v3/tenant_access_token/internal` with the app id and secret.
//! Only an HTTP 200 carrying a non-empty `tenant_access_token` counts as
//! success.

use async_trait::async_trait;
use larkbridge_core::ports::TokenIssuer;
use larkbridge_domain::{Credentials, LarkError, Result};
use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::http::HttpClient;

/// [`TokenIssuer`] backed by the internal-app token endpoint.
#[derive(Debug, Clone)]
pub struct TenantTokenIssuer {
    http: HttpClient,
    endpoint: Url,
}

impl TenantTokenIssuer {
    /// `endpoint` is the absolute URL of the token endpoint.
    pub fn new(http: HttpClient, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Token exchange URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TokenIssuer for TenantTokenIssuer {
    #[instrument(skip_all, fields(app_id = %credentials.app_id))]
    async fn issue(&self, credentials: &Credentials) -> Result<String> {
        let body = json!({
            "app_id": credentials.app_id,
            "app_secret": credentials.app_secret,
        });
        let request = self.http.request(Method::POST, self.endpoint.clone()).json(&body);

        let (status, response) = self.http.send_json(request).await.map_err(|err| {
            warn!(error = %err, "tenant token request failed");
            LarkError::Authentication(format!("tenant token request failed: {err}"))
        })?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "tenant token endpoint rejected credentials");
            return Err(LarkError::Authentication(format!(
                "Failed to get tenant token. Status code: {}",
                status.as_u16()
            )));
        }

        let token = response
            .get("tenant_access_token")
            .and_then(|value| value.as_str())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                let code = response.get("code").and_then(|value| value.as_i64());
                warn!(?code, "tenant token missing from response");
                LarkError::Authentication("Token not found in the response.".into())
            })?;

        debug!(expire = ?response.get("expire"), "tenant token issued");
        Ok(token.to_string())
    }
}
