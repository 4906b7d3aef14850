//! # Coffee Shop Auth
//!
//! Authorization for the Coffee Shop API. Access tokens are issued by an
//! external identity provider and only ever verified here.
//!
//! - [`error`]: The structured [`AuthError`] taxonomy surfaced to callers
//! - [`claims`]: Validated claim sets and the request-scoped [`AuthContext`]
//! - [`keys`]: The provider's signing keys, held as atomically swapped snapshots
//! - [`verifier`]: Bearer extraction and RS256 token verification
//! - [`permissions`]: Exact-match permission scope checks
//! - [`gate`]: [`AuthGate`], which composes the above around a guarded operation
//!
//! # Flow
//!
//! ```text
//! Authorization header
//!   → extract_bearer          (AuthorizationHeaderMissing / InvalidHeaderFormat)
//!   → decode header, kid      (InvalidToken)
//!   → SigningKeyStore lookup  (SigningKeyNotFound, one re-fetch on miss)
//!   → signature               (SignatureInvalid)
//!   → exp / aud / iss         (TokenExpired / InvalidClaims)
//!   → check_permission        (PermissionsMissing)
//!   → AuthContext
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coffeeshop_auth::{AuthGate, RemoteJwks, SigningKeyStore, TokenVerifier};
//! use coffeeshop_config::AuthConfig;
//!
//! let config = AuthConfig::from_env();
//! let source = RemoteJwks::new(&config.jwks_url, config.jwks_timeout)?;
//! let keys = SigningKeyStore::new(Arc::new(source), config.jwks_min_refresh_interval);
//! let gate = AuthGate::new(TokenVerifier::new(Arc::new(keys), &config));
//!
//! let result = gate
//!     .guard(&headers, "post:drinks", |ctx| async move { create(ctx).await })
//!     .await?;
//! ```

pub mod claims;
pub mod error;
pub mod gate;
pub mod keys;
pub mod permissions;
pub mod verifier;

#[cfg(any(test, feature = "test-utils"))]
pub mod testutil;

// Re-export commonly used types at crate root
pub use claims::{AuthContext, Claims};
pub use error::AuthError;
pub use gate::{AuthGate, AuthStage};
pub use keys::{JwksSource, KeySetError, RemoteJwks, SigningKeySet, SigningKeyStore, StaticJwks};
pub use permissions::check_permission;
pub use verifier::{TokenVerifier, extract_bearer};
