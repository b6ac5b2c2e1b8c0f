//! Shared fixtures for the infra integration tests.

use larkbridge_domain::{Credentials, LarkConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";
pub const RECORDS_PATH: &str = "/open-apis/bitable/v1/apps/bascn1/tables/tbl1/records";

/// Config pointed at the mock server with pacing disabled.
pub fn config_for(server: &MockServer) -> LarkConfig {
    let mut config = LarkConfig::new(Credentials::new("cli_test", "secret_test"));
    config.base_uri = format!("{}/open-apis/", server.uri());
    config.bulk.pause_ms = 0;
    config.http.system_proxy = false;
    config
}

/// Mount the token endpoint returning `token`, expected `times` times.
pub async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_json(json!({"app_id": "cli_test", "app_secret": "secret_test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "tenant_access_token": token,
            "expire": 7200
        })))
        .expect(times)
        .mount(server)
        .await;
}
