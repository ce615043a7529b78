//! Gateway client against a mock gateway server.

use std::time::Duration;

use apkfetch_core::ports::{PackageDelivery, StoreClientError, StoreClientPort, StoreSession};
use apkfetch_core::{LocaleProfile, PackageId};
use apkfetch_gateway::{GatewayClientConfig, GatewayStoreClient};
use futures_util::StreamExt;
use httpmock::prelude::*;
use serde_json::json;

fn profile() -> LocaleProfile {
    LocaleProfile {
        language: "it_IT".to_string(),
        timezone: "Europe/Rome".to_string(),
        device_profile: "bacon".to_string(),
    }
}

fn session() -> StoreSession {
    StoreSession {
        token: "session-1".to_string(),
        profile: profile(),
    }
}

fn client_for(server: &MockServer) -> GatewayStoreClient {
    GatewayStoreClient::new(&GatewayClientConfig::new().with_base_url(server.base_url())).unwrap()
}

fn package(id: &str) -> PackageId {
    PackageId::parse(id).unwrap()
}

async fn collect_body(delivery: PackageDelivery) -> Result<Vec<u8>, StoreClientError> {
    let mut stream = delivery.data.expect("delivery should carry a body");
    let mut data = Vec::new();
    while let Some(chunk) = stream.next().await {
        data.extend_from_slice(&chunk?);
    }
    Ok(data)
}

#[tokio::test]
async fn authenticate_posts_account_and_returns_session() {
    let server = MockServer::start_async().await;
    let auth = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth").json_body(json!({
                "gsf_id": 3_141_592,
                "token": "account-token",
                "lang": "it_IT",
                "timezone": "Europe/Rome",
                "device": "bacon"
            }));
            then.status(200).json_body(json!({"session": "session-1"}));
        })
        .await;

    let session = client_for(&server)
        .authenticate(3_141_592, "account-token", &profile())
        .await
        .unwrap();

    auth.assert_async().await;
    assert_eq!(session.token, "session-1");
    assert_eq!(session.profile, profile());
}

#[tokio::test]
async fn rejected_account_is_authentication_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth");
            then.status(401);
        })
        .await;

    let err = client_for(&server)
        .authenticate(1, "expired", &profile())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreClientError::Authentication { .. }));
}

#[tokio::test]
async fn auth_server_error_is_network_error_with_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth");
            then.status(500);
        })
        .await;

    let err = client_for(&server)
        .authenticate(1, "t", &profile())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreClientError::Network {
            status_code: Some(500),
            ..
        }
    ));
}

#[tokio::test]
async fn fetch_returns_details_and_streams_body() {
    let server = MockServer::start_async().await;
    let details = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/packages/com.example.app")
                .header("authorization", "Bearer session-1")
                .header("accept-language", "it_IT")
                .header("x-timezone", "Europe/Rome")
                .header("x-device", "bacon");
            then.status(200).json_body(json!({
                "version_string": "1.2.3",
                "version_code": 123,
                "download_url": "/files/com.example.app.apk"
            }));
        })
        .await;
    let body = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/files/com.example.app.apk")
                .header("authorization", "Bearer session-1");
            then.status(200).body(b"PK\x03\x04apk-bytes");
        })
        .await;

    let delivery = client_for(&server)
        .fetch(&session(), &package("com.example.app"))
        .await
        .unwrap();

    details.assert_async().await;
    assert_eq!(delivery.version_string.as_deref(), Some("1.2.3"));
    assert_eq!(delivery.version_code, Some(123));
    assert_eq!(collect_body(delivery).await.unwrap(), b"PK\x03\x04apk-bytes");
    body.assert_async().await;
}

#[tokio::test]
async fn fetch_without_download_url_has_no_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.example.app");
            then.status(200)
                .json_body(json!({"version_string": "1.0", "version_code": 1}));
        })
        .await;

    let delivery = client_for(&server)
        .fetch(&session(), &package("com.example.app"))
        .await
        .unwrap();

    assert!(delivery.data.is_none());
    assert_eq!(delivery.version_code, Some(1));
}

#[tokio::test]
async fn unknown_or_withdrawn_package_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.missing.app");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.pulled.app");
            then.status(410);
        })
        .await;

    let client = client_for(&server);
    for id in ["com.missing.app", "com.pulled.app"] {
        let err = client.fetch(&session(), &package(id)).await.unwrap_err();
        assert_eq!(err, StoreClientError::package_not_found(id));
    }
}

#[tokio::test]
async fn undecodable_details_are_invalid_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.example.app");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server)
        .fetch(&session(), &package("com.example.app"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreClientError::InvalidResponse { .. }));
}

#[tokio::test]
async fn missing_body_file_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.example.app");
            then.status(200).json_body(json!({
                "version_string": "1.0",
                "version_code": 1,
                "download_url": "/files/gone.apk"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/files/gone.apk");
            then.status(404);
        })
        .await;

    let err = client_for(&server)
        .fetch(&session(), &package("com.example.app"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreClientError::PackageNotFound { .. }));
}

#[tokio::test]
async fn stalled_body_response_is_transfer_interrupted() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/packages/com.example.app");
            then.status(200).json_body(json!({
                "version_string": "1.0",
                "version_code": 1,
                "download_url": "/files/slow.apk"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/files/slow.apk");
            then.status(200)
                .body("late")
                .delay(Duration::from_secs(2));
        })
        .await;
    let config = GatewayClientConfig::new()
        .with_base_url(server.base_url())
        .with_read_timeout(Duration::from_millis(100));
    let client = GatewayStoreClient::new(&config).unwrap();

    let err = client
        .fetch(&session(), &package("com.example.app"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreClientError::TransferInterrupted { .. }));
}

#[tokio::test]
async fn unreachable_gateway_is_network_error() {
    let config = GatewayClientConfig::new().with_base_url("http://127.0.0.1:9");
    let client = GatewayStoreClient::new(&config).unwrap();

    let err = client.authenticate(1, "t", &profile()).await.unwrap_err();

    assert!(matches!(err, StoreClientError::Network { .. }));
}
