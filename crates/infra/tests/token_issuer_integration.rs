//! Integration tests for the tenant token issuer against a mock Lark server.

use std::net::TcpListener;

use larkbridge_core::ports::TokenIssuer;
use larkbridge_domain::{Credentials, LarkError};
use larkbridge_infra::{HttpClient, TenantTokenIssuer};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";

fn issuer_for(base: &str) -> TenantTokenIssuer {
    let endpoint = Url::parse(&format!("{base}{TOKEN_PATH}")).unwrap();
    TenantTokenIssuer::new(HttpClient::builder().system_proxy(false).build().unwrap(), endpoint)
}

fn credentials() -> Credentials {
    Credentials::new("cli_test", "secret_test")
}

#[tokio::test]
async fn returns_token_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 0, "tenant_access_token": "t-abc", "expire": 7200})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = issuer_for(&server.uri()).issue(&credentials()).await.unwrap();

    assert_eq!(token, "t-abc");
}

#[tokio::test]
async fn non_200_status_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": 10003})))
        .mount(&server)
        .await;

    let err = issuer_for(&server.uri()).issue(&credentials()).await.unwrap_err();

    match err {
        LarkError::Authentication(msg) => assert!(msg.contains("400"), "{msg}"),
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_token_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "code": 10014,
                    "msg": "app secret invalid",
                    "tenant_access_token": ""
                })),
        )
        .mount(&server)
        .await;

    let err = issuer_for(&server.uri()).issue(&credentials()).await.unwrap_err();

    assert_eq!(err, LarkError::Authentication("Token not found in the response.".into()));
}

#[tokio::test]
async fn missing_token_field_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .mount(&server)
        .await;

    let err = issuer_for(&server.uri()).issue(&credentials()).await.unwrap_err();

    assert!(matches!(err, LarkError::Authentication(_)));
}

#[tokio::test]
async fn unreachable_server_is_authentication_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = issuer_for(&format!("http://{addr}")).issue(&credentials()).await.unwrap_err();

    assert!(matches!(err, LarkError::Authentication(msg) if msg.contains("request failed")));
}
