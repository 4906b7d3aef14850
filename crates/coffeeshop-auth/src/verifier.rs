//! Bearer token verification.
//!
//! Only RS256 tokens are accepted. The token's `kid` selects the verification
//! key from the [`SigningKeyStore`]; signature, expiry, audience and issuer
//! are then checked by `jsonwebtoken`, and the claim set is returned exactly
//! as it was issued.

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};
use serde_json::{Map, Value};
use tracing::debug;

use coffeeshop_config::AuthConfig;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::gate::AuthStage;
use crate::keys::SigningKeyStore;

/// Extracts the raw token from an `Authorization: Bearer <token>` header.
///
/// The header must consist of exactly two space-separated parts, the first
/// being the case-sensitive scheme `Bearer`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::AuthorizationHeaderMissing)?;

    let value = value.to_str().map_err(|_| {
        AuthError::InvalidHeaderFormat("Authorization header contains invalid characters")
    })?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", ""] => Err(AuthError::InvalidHeaderFormat("Token not found")),
        ["Bearer", token] => Ok(*token),
        [_, _] => Err(AuthError::InvalidHeaderFormat(
            "Authorization header must start with \"Bearer\"",
        )),
        [_] => Err(AuthError::InvalidHeaderFormat("Token not found")),
        _ => Err(AuthError::InvalidHeaderFormat(
            "Authorization header must be bearer token",
        )),
    }
}

pub struct TokenVerifier {
    keys: Arc<SigningKeyStore>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<SigningKeyStore>, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = config.leeway_secs;

        Self { keys, validation }
    }

    /// Verifies a raw token and returns its claim set unchanged.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header has no kid".to_string()))?;
        debug!(stage = ?AuthStage::TokenDecoded, kid = %kid);

        let key = self
            .keys
            .decoding_key(&kid)
            .await
            .ok_or(AuthError::SigningKeyNotFound { kid })?;

        let data = decode::<Map<String, Value>>(token, &key, &self.validation)
            .map_err(|e| map_decode_error(e.into_kind()))?;
        debug!(stage = ?AuthStage::ClaimsValidated);

        Ok(Claims(data.claims))
    }

    /// Extracts the bearer token from `headers` and verifies it.
    pub async fn verify_headers(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = extract_bearer(headers)?;
        debug!(stage = ?AuthStage::HeaderParsed);
        self.verify(token).await
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("keys", &self.keys)
            .field("audience", &self.validation.aud)
            .field("issuer", &self.validation.iss)
            .finish()
    }
}

fn map_decode_error(kind: ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience => {
            AuthError::InvalidClaims("incorrect audience".to_string())
        }
        ErrorKind::InvalidIssuer => AuthError::InvalidClaims("incorrect issuer".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::InvalidClaims(format!("missing required claim {}", claim))
        }
        ErrorKind::ImmatureSignature => {
            AuthError::InvalidClaims("token is not valid yet".to_string())
        }
        other => AuthError::InvalidToken(format!("{:?}", other)),
    }
}
