//! Fixtures for exercising the auth stack without an identity provider.
//!
//! Two RSA key pairs live under `testdata/`. Their public halves are exposed
//! as JWKs with well-known key ids, and [`TokenBuilder`] mints RS256 tokens
//! signed by either of them.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::Utc;
use data_encoding::BASE64URL_NOPAD;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Map, Value, json};

use coffeeshop_config::AuthConfig;

use crate::gate::AuthGate;
use crate::keys::{SigningKeyStore, StaticJwks};
use crate::verifier::TokenVerifier;

pub const PRIMARY_KID: &str = "coffeeshop-test-primary";
pub const SECONDARY_KID: &str = "coffeeshop-test-secondary";
pub const TEST_DOMAIN: &str = "coffee-shop.test";
pub const TEST_AUDIENCE: &str = "drinks";
pub const TEST_ISSUER: &str = "https://coffee-shop.test/";
pub const TEST_SUBJECT: &str = "auth0|barista";

const PRIMARY_PEM: &str = include_str!("../testdata/primary_key.pem");
const SECONDARY_PEM: &str = include_str!("../testdata/secondary_key.pem");

const PRIMARY_N: &str = "p_C-7sPeFEe5nkJJ4mXWY0UcsIEm0787bLqWj70QnRr-FjWQGTRwN_pKEtu2NAzK08-nWvYKlS0UHoQkYcX2Bp348ba4s_iDDJ1fXSnEXF8CQG9e9lercSB4oUWr20CcvgM0-AdMIFKv7VC7CfE7ADQzwgap_Lmo8Saiazrad4AWkbFR8E9u54NB3eZU6B2uCToSzYp8W4mAL-qn5ZLh1rXqII9QAkR5ioOHdhbIKiqlNNTwW9mLdIieGY3gD1w3n5Mt81NjHFUOWFywgMr-BRawOXt5KTiQOwdrgtyO1bRVy_4nSZOqmbZCJ_hbyPWWpxvwhHkEusEPKLt9fi-7Kw";
const SECONDARY_N: &str = "iUE3bUF7tuFTpuYyz6QlcJuhEAdNGvdCrSgxIYNSXI8mDT0xCkgumkBwY0wELSU1USbewIolzMxX8YLAozSdiWNvw_04vekbjfsgA2s4JNTgvoFMi5W4gmwVCrcCWemaFX_xFxBwie2Z6ilhVcqH_LdAlq6rseXRYDRTt_P_O2rZ-CFy0h8OXkAZ9h-1aeZB-Yi0SaRt4-vlZUSP-X6kQVJeIGArS-PGbt3YNb11hxvtlVlATTQw3Apus0h45mqzjr7k30Bz4NOywMTw6RwpomWO-qCzpuYaxPwPtkCuRm5IXkRT8IheSlMnCOFIiiNgRXPOoW7_KF1mR7I-AxOWKQ";

fn rsa_jwk(kid: &str, n: &str) -> Jwk {
    serde_json::from_value(json!({
        "kty": "RSA",
        "kid": kid,
        "use": "sig",
        "alg": "RS256",
        "n": n,
        "e": "AQAB",
    }))
    .expect("valid test JWK")
}

pub fn primary_jwk() -> Jwk {
    rsa_jwk(PRIMARY_KID, PRIMARY_N)
}

pub fn secondary_jwk() -> Jwk {
    rsa_jwk(SECONDARY_KID, SECONDARY_N)
}

pub fn jwk_set(keys: Vec<Jwk>) -> JwkSet {
    JwkSet { keys }
}

/// Provider settings matching the tokens minted by [`TokenBuilder`].
pub fn test_auth_config() -> AuthConfig {
    let mut config = AuthConfig::new(TEST_DOMAIN, TEST_AUDIENCE);
    config.jwks_min_refresh_interval = Duration::ZERO;
    config
}

/// A verifier whose key set only contains the primary key.
pub fn static_verifier() -> TokenVerifier {
    let config = test_auth_config();
    let source = StaticJwks(jwk_set(vec![primary_jwk()]));
    let keys = SigningKeyStore::new(Arc::new(source), config.jwks_min_refresh_interval);
    TokenVerifier::new(Arc::new(keys), &config)
}

pub fn static_gate() -> AuthGate {
    AuthGate::new(static_verifier())
}

pub fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is header-safe"),
    );
    headers
}

/// Builds signed access tokens shaped like the provider's.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    claims: Map<String, Value>,
    kid: Option<String>,
    pem: &'static str,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    /// A token for [`TEST_SUBJECT`] with no permissions, valid for an hour,
    /// signed by the primary key.
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        let mut claims = Map::new();
        claims.insert("iss".to_string(), json!(TEST_ISSUER));
        claims.insert("sub".to_string(), json!(TEST_SUBJECT));
        claims.insert("aud".to_string(), json!(TEST_AUDIENCE));
        claims.insert("iat".to_string(), json!(now));
        claims.insert("exp".to_string(), json!(now + 3600));
        claims.insert("permissions".to_string(), json!([]));

        Self {
            claims,
            kid: Some(PRIMARY_KID.to_string()),
            pem: PRIMARY_PEM,
        }
    }

    pub fn permissions(self, permissions: &[&str]) -> Self {
        self.claim("permissions", json!(permissions))
    }

    /// Sets `exp` relative to now; negative values give an expired token.
    pub fn expires_in(self, seconds: i64) -> Self {
        let exp = Utc::now().timestamp() + seconds;
        self.claim("exp", json!(exp))
    }

    pub fn claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    pub fn kid(mut self, kid: &str) -> Self {
        self.kid = Some(kid.to_string());
        self
    }

    pub fn without_kid(mut self) -> Self {
        self.kid = None;
        self
    }

    /// Signs with the secondary key. The kid header is left untouched, so
    /// without a matching [`kid`](Self::kid) call the signature will not verify.
    pub fn signed_with_secondary(mut self) -> Self {
        self.pem = SECONDARY_PEM;
        self
    }

    pub fn build(&self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid.clone();
        let key = EncodingKey::from_rsa_pem(self.pem.as_bytes()).expect("valid test key");
        encode(&header, &self.claims, &key).expect("token encodes")
    }

    /// Same claims, HMAC-signed with a shared secret.
    pub fn build_hs256(&self, secret: &[u8]) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = self.kid.clone();
        encode(&header, &self.claims, &EncodingKey::from_secret(secret)).expect("token encodes")
    }

    /// Same claims with `alg: none` and an empty signature.
    pub fn build_unsigned(&self) -> String {
        let payload = serde_json::to_vec(&self.claims).expect("claims serialize");
        format!(
            "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.",
            BASE64URL_NOPAD.encode(&payload)
        )
    }
}
