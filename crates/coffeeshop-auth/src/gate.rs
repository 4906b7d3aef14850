//! The auth gate: bearer extraction, token verification and the permission
//! check composed around a protected operation.

use std::future::Future;
use std::sync::Arc;

use axum::http::HeaderMap;
use tracing::{debug, warn};

use coffeeshop_observability::{track_auth_denial, track_authorization_check};

use crate::claims::AuthContext;
use crate::error::AuthError;
use crate::permissions::check_permission;
use crate::verifier::TokenVerifier;

/// Progress of a request through the gate. A denial carries the stage that was
/// reached before the failing step (see [`AuthError::stage`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Unauthenticated,
    HeaderParsed,
    TokenDecoded,
    SignatureVerified,
    ClaimsValidated,
    PermissionChecked,
    Authorized,
}

#[derive(Clone, Debug)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
}

impl AuthGate {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    /// Runs every check for `permission` and returns the request's auth context.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<AuthContext, AuthError> {
        let result = self.run(headers, permission).await;

        match &result {
            Ok(_) => {
                debug!(stage = ?AuthStage::Authorized, permission, "Request authorized");
                track_authorization_check(permission, true);
            }
            Err(e) => {
                warn!(
                    code = e.code(),
                    stage = ?e.stage(),
                    permission,
                    error = %e,
                    "Request denied"
                );
                track_auth_denial(e.code());
                track_authorization_check(permission, false);
            }
        }

        result
    }

    /// Invokes `operation` with the auth context only if the request is
    /// authorized for `permission`. On denial the operation is never called.
    pub async fn guard<F, Fut, T>(
        &self,
        headers: &HeaderMap,
        permission: &str,
        operation: F,
    ) -> Result<T, AuthError>
    where
        F: FnOnce(AuthContext) -> Fut,
        Fut: Future<Output = T>,
    {
        let ctx = self.authorize(headers, permission).await?;
        Ok(operation(ctx).await)
    }

    async fn run(&self, headers: &HeaderMap, permission: &str) -> Result<AuthContext, AuthError> {
        let claims = self.verifier.verify_headers(headers).await?;
        check_permission(&claims, permission)?;
        debug!(stage = ?AuthStage::PermissionChecked, permission);
        Ok(AuthContext::new(claims))
    }
}
