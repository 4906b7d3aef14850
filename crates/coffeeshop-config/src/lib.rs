//! # Coffee Shop Config
//!
//! Configuration types for the Coffee Shop API, loaded from environment
//! variables (a `.env` file is honoured by the binaries through `dotenvy`):
//!
//! - [`auth`]: Identity provider settings used by the token verifier
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen addresses and startup behaviour
//!
//! # Example
//!
//! ```ignore
//! use coffeeshop_config::{AuthConfig, CorsConfig, ServerConfig};
//!
//! let auth_config = AuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use server::ServerConfig;

/// Reads and parses a variable through `lookup`, falling back to `default`
/// when it is unset or unparsable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag. Accepts `true`/`1`/`yes`/`on` and their negatives in
/// any case; anything else falls back to `default`.
pub(crate) fn flag_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|s| s.trim().to_lowercase()).as_deref() {
        Some("true" | "1" | "yes" | "on") => true,
        Some("false" | "0" | "no" | "off") => false,
        _ => default,
    }
}
