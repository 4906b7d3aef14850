//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Permission extractors that run the auth gate before a handler
//!
//! # Authorization Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. A `Require*` extractor hands the headers to the [`AuthGate`](coffeeshop_auth::AuthGate)
//! 3. The gate verifies the token and checks the extractor's permission
//! 4. Handler executes only if all checks pass; otherwise the structured
//!    [`AuthError`](coffeeshop_auth::AuthError) becomes the response
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::RequireDrinksCreate;
//!
//! async fn create_drink(
//!     RequireDrinksCreate(ctx): RequireDrinksCreate,
//! ) -> impl IntoResponse {
//!     // Only executes if the token grants "post:drinks"
//! }
//! ```

pub mod auth;
