//! Identity provider configuration.
//!
//! Access tokens are issued by an external provider (Auth0 by default) and
//! verified locally against the provider's published key set.
//!
//! # Environment Variables
//!
//! - `AUTH0_DOMAIN`: Provider tenant domain (default: `coffee-shop.us.auth0.com`)
//! - `API_AUDIENCE`: Expected `aud` claim (default: `drinks`)
//! - `AUTH_ISSUER`: Expected `iss` claim (default: `https://{AUTH0_DOMAIN}/`)
//! - `JWKS_URL`: Key discovery endpoint (default: `https://{AUTH0_DOMAIN}/.well-known/jwks.json`)
//! - `JWT_LEEWAY_SECS`: Clock skew tolerated on `exp` (default: 0)
//! - `JWKS_MIN_REFRESH_SECS`: Minimum spacing between key set re-fetches (default: 30)
//! - `JWKS_TIMEOUT_SECS`: HTTP timeout for the key set fetch (default: 10)

use std::env;
use std::time::Duration;

use crate::parse_or;

const DEFAULT_DOMAIN: &str = "coffee-shop.us.auth0.com";
const DEFAULT_AUDIENCE: &str = "drinks";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub domain: String,
    pub audience: String,
    pub issuer: String,
    pub jwks_url: String,
    pub leeway_secs: u64,
    pub jwks_min_refresh_interval: Duration,
    pub jwks_timeout: Duration,
}

impl AuthConfig {
    /// Builds a config for `domain` with the provider's conventional issuer
    /// and key discovery URLs.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            issuer: format!("https://{}/", domain),
            jwks_url: format!("https://{}/.well-known/jwks.json", domain),
            domain,
            audience: audience.into(),
            leeway_secs: 0,
            jwks_min_refresh_interval: Duration::from_secs(30),
            jwks_timeout: Duration::from_secs(10),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = lookup("AUTH0_DOMAIN").unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        let audience = lookup("API_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());

        let mut config = Self::new(domain, audience);
        if let Some(issuer) = lookup("AUTH_ISSUER") {
            config.issuer = issuer;
        }
        if let Some(jwks_url) = lookup("JWKS_URL") {
            config.jwks_url = jwks_url;
        }
        config.leeway_secs = parse_or(&lookup, "JWT_LEEWAY_SECS", 0);
        config.jwks_min_refresh_interval =
            Duration::from_secs(parse_or(&lookup, "JWKS_MIN_REFRESH_SECS", 30));
        config.jwks_timeout = Duration::from_secs(parse_or(&lookup, "JWKS_TIMEOUT_SECS", 10));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.domain, "coffee-shop.us.auth0.com");
        assert_eq!(config.audience, "drinks");
        assert_eq!(config.issuer, "https://coffee-shop.us.auth0.com/");
        assert_eq!(
            config.jwks_url,
            "https://coffee-shop.us.auth0.com/.well-known/jwks.json"
        );
        assert_eq!(config.leeway_secs, 0);
        assert_eq!(config.jwks_min_refresh_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_domain_drives_issuer_and_jwks_url() {
        let config = AuthConfig::from_lookup(lookup_from(&[("AUTH0_DOMAIN", "tenant.eu.auth0.com")]));
        assert_eq!(config.issuer, "https://tenant.eu.auth0.com/");
        assert_eq!(
            config.jwks_url,
            "https://tenant.eu.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_explicit_overrides() {
        let config = AuthConfig::from_lookup(lookup_from(&[
            ("AUTH_ISSUER", "https://issuer.example/"),
            ("JWKS_URL", "http://127.0.0.1:9999/jwks.json"),
            ("JWT_LEEWAY_SECS", "5"),
            ("JWKS_MIN_REFRESH_SECS", "0"),
            ("JWKS_TIMEOUT_SECS", "2"),
        ]));
        assert_eq!(config.issuer, "https://issuer.example/");
        assert_eq!(config.jwks_url, "http://127.0.0.1:9999/jwks.json");
        assert_eq!(config.leeway_secs, 5);
        assert_eq!(config.jwks_min_refresh_interval, Duration::ZERO);
        assert_eq!(config.jwks_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = AuthConfig::from_lookup(lookup_from(&[("JWT_LEEWAY_SECS", "soon")]));
        assert_eq!(config.leeway_secs, 0);
    }
}
