//! reqwest wrapper shared by the token issuer and the authenticated transport

use std::time::Duration;

use larkbridge_domain::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS};
use larkbridge_domain::{HttpConfig, LarkError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with timeouts and JSON body handling.
///
/// No retries: a failed request surfaces to the caller as-is.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, LarkError> {
        Self::builder().build()
    }

    /// Client with the timeouts and proxy setting from `config`.
    pub fn from_config(config: &HttpConfig) -> Result<Self, LarkError> {
        Self::builder_from_config(config).build()
    }

    /// Builder preloaded with `config`, for callers adding headers.
    pub fn builder_from_config(config: &HttpConfig) -> HttpClientBuilder {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .system_proxy(config.system_proxy)
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, LarkError> {
        let request = builder.build().map_err(|err| LarkError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    path = url.path(),
                    status = %response.status(),
                    "received HTTP response"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(%method, path = url.path(), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Send and decode the body as JSON. An empty body decodes to `{}`.
    pub async fn send_json(
        &self,
        builder: RequestBuilder,
    ) -> Result<(StatusCode, Value), LarkError> {
        let response = self.send(builder).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| LarkError::from(InfraError::from(err)))?;
        Ok((status, decode_json_body(&body)?))
    }
}

/// Decode a response body, treating whitespace-only bodies as `{}`.
pub fn decode_json_body(body: &[u8]) -> Result<Value, LarkError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body).map_err(|err| InfraError::from(err).into())
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
    system_proxy: bool,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            system_proxy: true,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    /// Whole-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `larkbridge/<version>` user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent with every request.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Route through the proxy named by the environment. On by default.
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    /// Build the client. `Content-Type: application/json` is added unless set.
    pub fn build(self) -> Result<HttpClient, LarkError> {
        let mut headers = self.default_headers.unwrap_or_default();
        headers.entry(CONTENT_TYPE).or_insert(HeaderValue::from_static("application/json"));

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .default_headers(headers)
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("larkbridge/", env!("CARGO_PKG_VERSION")).into()),
            );

        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|err| LarkError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn local_client() -> HttpClient {
        HttpClient::builder().system_proxy(false).build().expect("http client")
    }

    #[test]
    fn environment_proxy_is_honoured_by_default() {
        assert!(HttpClient::builder().system_proxy);

        let config = HttpConfig { system_proxy: false, ..HttpConfig::default() };
        assert!(!HttpClient::builder_from_config(&config).system_proxy);
        assert!(HttpClient::builder_from_config(&HttpConfig::default()).system_proxy);
    }

    #[tokio::test]
    async fn decodes_json_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
            .expect(1)
            .mount(&server)
            .await;

        let client = local_client();
        let (status, body) = client
            .send_json(client.request(Method::GET, format!("{}/ping", server.uri())))
            .await
            .expect("response");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"code": 0}));
    }

    #[tokio::test]
    async fn empty_body_decodes_to_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = local_client();
        let (status, body) =
            client.send_json(client.request(Method::POST, server.uri())).await.expect("response");

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"code": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = local_client();
        let (status, body) =
            client.send_json(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 1);
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = local_client();
        let result = client.send(client.request(Method::GET, format!("http://{addr}"))).await;

        assert!(matches!(result, Err(LarkError::Transport(_))), "got {result:?}");
    }

    #[test]
    fn invalid_json_body_is_transport_error() {
        assert!(matches!(decode_json_body(b"<html>"), Err(LarkError::Transport(_))));
        assert_eq!(decode_json_body(b"  \n").unwrap(), json!({}));
    }
}
