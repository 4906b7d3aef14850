use std::sync::Arc;
use std::time::Duration;

use coffeeshop_auth::testutil::{
    SECONDARY_KID, TokenBuilder, bearer_headers, jwk_set, primary_jwk, secondary_jwk,
    test_auth_config,
};
use coffeeshop_auth::{AuthGate, RemoteJwks, SigningKeyStore, TokenVerifier};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JWKS_PATH: &str = "/.well-known/jwks.json";

fn jwks_body(keys: Vec<jsonwebtoken::jwk::Jwk>) -> serde_json::Value {
    serde_json::to_value(jwk_set(keys)).unwrap()
}

fn gate_for(server: &MockServer, min_refresh_interval: Duration) -> AuthGate {
    let mut config = test_auth_config();
    config.jwks_url = format!("{}{}", server.uri(), JWKS_PATH);
    config.jwks_min_refresh_interval = min_refresh_interval;

    let source = RemoteJwks::new(&config.jwks_url, config.jwks_timeout).unwrap();
    let keys = SigningKeyStore::new(Arc::new(source), config.jwks_min_refresh_interval);
    AuthGate::new(TokenVerifier::new(Arc::new(keys), &config))
}

#[tokio::test]
async fn test_keys_are_fetched_on_first_use() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body(vec![primary_jwk()])))
        .expect(1)
        .mount(&server)
        .await;

    let gate = gate_for(&server, Duration::ZERO);
    let token = TokenBuilder::new().permissions(&["get:drinks-detail"]).build();

    for _ in 0..3 {
        assert!(gate
            .authorize(&bearer_headers(&token), "get:drinks-detail")
            .await
            .is_ok());
    }
}

#[tokio::test]
async fn test_rotated_key_is_picked_up_on_kid_miss() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body(vec![primary_jwk()])))
        .mount(&server)
        .await;

    let gate = gate_for(&server, Duration::ZERO);
    let old = TokenBuilder::new().permissions(&["post:drinks"]).build();
    assert!(gate.authorize(&bearer_headers(&old), "post:drinks").await.is_ok());

    // Provider publishes the new key alongside the old one.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(jwks_body(vec![primary_jwk(), secondary_jwk()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rotated = TokenBuilder::new()
        .permissions(&["post:drinks"])
        .kid(SECONDARY_KID)
        .signed_with_secondary()
        .build();
    assert!(gate.authorize(&bearer_headers(&rotated), "post:drinks").await.is_ok());
    assert!(gate.authorize(&bearer_headers(&old), "post:drinks").await.is_ok());
}

#[tokio::test]
async fn test_fetch_failure_is_signing_key_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gate = gate_for(&server, Duration::ZERO);
    let token = TokenBuilder::new().permissions(&["post:drinks"]).build();

    let err = gate
        .authorize(&bearer_headers(&token), "post:drinks")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "signing_key_not_found");
}

#[tokio::test]
async fn test_malformed_key_set_is_signing_key_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a key set" })))
        .mount(&server)
        .await;

    let gate = gate_for(&server, Duration::ZERO);
    let token = TokenBuilder::new().permissions(&["post:drinks"]).build();

    let err = gate
        .authorize(&bearer_headers(&token), "post:drinks")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "signing_key_not_found");
}

#[tokio::test]
async fn test_concurrent_first_requests_fetch_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(jwks_body(vec![primary_jwk()]))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gate = Arc::new(gate_for(&server, Duration::ZERO));
    let token = Arc::new(TokenBuilder::new().permissions(&["get:drinks-detail"]).build());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let token = Arc::clone(&token);
            tokio::spawn(async move {
                gate.authorize(&bearer_headers(&token), "get:drinks-detail")
                    .await
                    .is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

#[tokio::test]
async fn test_unknown_kid_within_refresh_interval_is_not_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(jwks_body(vec![primary_jwk()])))
        .expect(1)
        .mount(&server)
        .await;

    let gate = gate_for(&server, Duration::from_secs(60));
    let token = TokenBuilder::new().permissions(&["post:drinks"]).build();
    assert!(gate.authorize(&bearer_headers(&token), "post:drinks").await.is_ok());

    let unknown = TokenBuilder::new()
        .permissions(&["post:drinks"])
        .kid("retired-key")
        .build();
    for _ in 0..3 {
        let err = gate
            .authorize(&bearer_headers(&unknown), "post:drinks")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "signing_key_not_found");
    }
}
