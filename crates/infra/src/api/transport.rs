//! Bearer-authenticated JSON transport

use async_trait::async_trait;
use larkbridge_core::ports::ApiTransport;
use larkbridge_domain::{AccessToken, HttpConfig, LarkError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// HTTP client bound to one base URI and one bearer token.
///
/// Immutable: a refreshed token gets a new transport.
#[derive(Debug, Clone)]
pub struct AuthenticatedTransport {
    http: HttpClient,
    base: Url,
}

impl AuthenticatedTransport {
    /// # Errors
    /// `Authentication` if the token cannot be used as a header value,
    /// `Config` if the HTTP client cannot be built.
    pub fn new(base: Url, token: &AccessToken, config: &HttpConfig) -> Result<Self> {
        let mut bearer = HeaderValue::from_str(&token.bearer())
            .map_err(|err| LarkError::from(InfraError::from(err)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = HttpClient::builder_from_config(config).default_headers(headers).build()?;

        Ok(Self { http, base: with_trailing_slash(base) })
    }

    /// Base URI, always ending in `/`.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a catalog path.
    ///
    /// # Errors
    /// `Config` if `path` does not join onto the base.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| LarkError::from(InfraError::from(err)))
    }

    async fn execute(&self, method: &Method, path: &str, request: RequestBuilder) -> Result<Value> {
        let (status, body) = self.http.send_json(request).await?;
        if !status.is_success() {
            warn!(
                %method,
                path,
                status = status.as_u16(),
                body = %body,
                "Lark API returned non-success status"
            );
        }
        Ok(body)
    }
}

#[async_trait]
impl ApiTransport for AuthenticatedTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path)?;
        self.execute(&Method::GET, path, self.http.request(Method::GET, url)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url_for(path)?;
        self.execute(&Method::POST, path, self.http.request(Method::POST, url).json(body)).await
    }
}

/// `Url::join` drops the last segment of a base without a trailing slash.
pub(crate) fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
