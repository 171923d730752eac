//! Integration tests for the authenticated client.
//!
//! A local mock server stands in for both the authentication and the data
//! service.

#![allow(clippy::unwrap_used)]

use automower_api::{ApiRoots, BoxError, WebAuthenticator, async_trait};
use automower_core::{AutomowerClient, Credentials, Error, MowerActivity};
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mower(id: &str, name: &str) -> serde_json::Value {
    json!({
        "type": "mower",
        "id": id,
        "attributes": {
            "system": {"name": name, "model": "450XH", "serialNumber": 190_500_845},
            "battery": {"batteryPercent": 100},
            "mower": {
                "mode": "MAIN_AREA",
                "activity": "CHARGING",
                "state": "RESTRICTED",
                "errorCode": 0,
                "errorCodeTimestamp": 0
            },
            "positions": [{"latitude": 57.7, "longitude": 14.47}]
        }
    })
}

async fn mount_token(server: &MockServer, access_token: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "scope": "iam:read amc:api",
            "expires_in": 86399,
            "provider": "husqvarna",
            "user_id": "user-1",
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> AutomowerClient {
    AutomowerClient::with_roots(
        Credentials::new("app-key", "app-secret"),
        ApiRoots::single(server.uri()).unwrap(),
    )
}

async fn logged_in_client(server: &MockServer) -> AutomowerClient {
    mount_token(server, "token-1").await;
    let mut client = client(server);
    client.authenticate_client_credentials().await.unwrap();
    client
}

struct FixedCallback(&'static str);

#[async_trait]
impl WebAuthenticator for FixedCallback {
    async fn authenticate(&self, _: &Url, _: &str) -> Result<Url, BoxError> {
        Ok(Url::parse(self.0)?)
    }
}

#[tokio::test]
async fn test_fetch_sends_auth_headers() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/mowers"))
        .and(header("authorization", "Bearer token-1"))
        .and(header("authorization-provider", "husqvarna"))
        .and(header("x-api-key", "app-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [mower("m-1", "Mower1")]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mowers = client.fetch_mowers().await.unwrap();
    assert_eq!(mowers.len(), 1);
    assert_eq!(mowers[0].id, "m-1");
    assert_eq!(mowers[0].activity, MowerActivity::Charging);
}

#[tokio::test]
async fn test_fetch_mower_names_in_order() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/mowers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [mower("m-1", "Mower1"), mower("m-2", "Mower2")]
        })))
        .mount(&server)
        .await;

    assert_eq!(
        client.fetch_mower_names().await.unwrap(),
        ["Mower1", "Mower2"]
    );
}

#[tokio::test]
async fn test_fetch_before_login_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/mowers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).fetch_mowers().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Api(automower_api::Error::NotLoggedIn)
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_status_codes_are_classified() {
    for status in [400_u16, 401, 418] {
        let server = MockServer::start().await;
        let client = logged_in_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1/mowers"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
            .mount(&server)
            .await;

        let err = client.fetch_mowers().await.unwrap_err();
        match (status, err.as_api()) {
            (400, Some(automower_api::Error::BadRequest))
            | (401, Some(automower_api::Error::Unauthorized))
            | (418, Some(automower_api::Error::InvalidStatusCode(418))) => {}
            _ => panic!("status {status} gave {err:?}"),
        }
        assert_eq!(err.requires_login(), status == 401);
    }
}

#[tokio::test]
async fn test_fetch_undecodable_body() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    let body = r#"{"data": [{"type": "mower", "id": "m-1"}]}"#;
    Mock::given(method("GET"))
        .and(path("/v1/mowers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let err = client.fetch_mowers().await.unwrap_err();
    match err.as_api() {
        Some(automower_api::Error::CannotDecode { body: raw, .. }) => assert_eq!(raw, body),
        _ => panic!("unexpected error: {err:?}"),
    }
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_fetch_uses_latest_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "refresh_token": "refresh-1",
            "scope": "iam:read amc:api",
            "expires_in": 3600,
            "provider": "husqvarna",
            "user_id": "user-1",
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/mowers"))
        .and(header("authorization", "Bearer user-token"))
        .and(header("x-api-key", "app-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let web = FixedCallback("automower://callback?code=abc&state=xyz");
    client
        .authenticate_authorization_code(&web, "automower://callback")
        .await
        .unwrap();

    assert!(client.fetch_mowers().await.unwrap().is_empty());
}
