//! Authorization error taxonomy.
//!
//! Every way a protected request can be refused maps to exactly one
//! [`AuthError`] variant. Each carries an HTTP status, a stable
//! machine-readable code and a human-readable description, and renders as the
//! shared JSON error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coffeeshop_core::error_response;
use thiserror::Error;

use crate::gate::AuthStage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    AuthorizationHeaderMissing,

    #[error("{0}")]
    InvalidHeaderFormat(&'static str),

    #[error("Unable to parse authentication token: {0}")]
    InvalidToken(String),

    #[error("Unable to find the appropriate key for kid {kid:?}")]
    SigningKeyNotFound { kid: String },

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Incorrect claims: {0}")]
    InvalidClaims(String),

    #[error("Missing required permission: {required}")]
    PermissionsMissing { required: String },
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::PermissionsMissing { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable identifier clients can match on.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthorizationHeaderMissing => "authorization_header_missing",
            AuthError::InvalidHeaderFormat(_) => "invalid_header_format",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::SigningKeyNotFound { .. } => "signing_key_not_found",
            AuthError::SignatureInvalid => "signature_invalid",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::PermissionsMissing { .. } => "permissions_missing",
        }
    }

    /// Last stage the request reached before being denied.
    pub fn stage(&self) -> AuthStage {
        match self {
            AuthError::AuthorizationHeaderMissing | AuthError::InvalidHeaderFormat(_) => {
                AuthStage::Unauthenticated
            }
            AuthError::InvalidToken(_) => AuthStage::HeaderParsed,
            AuthError::SigningKeyNotFound { .. } | AuthError::SignatureInvalid => {
                AuthStage::TokenDecoded
            }
            AuthError::TokenExpired | AuthError::InvalidClaims(_) => AuthStage::SignatureVerified,
            AuthError::PermissionsMissing { .. } => AuthStage::ClaimsValidated,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.code(), self.to_string())
    }
}
