//! Listen addresses and startup behaviour.
//!
//! - `HOST`: Bind address (default: `0.0.0.0`)
//! - `PORT`: API port (default: 3000)
//! - `METRICS_PORT`: Prometheus exporter port (default: 9090)
//! - `RUN_MIGRATIONS`: Apply pending migrations on startup (default: false)

use std::env;

use crate::{flag_or, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            metrics_port: 9090,
            run_migrations: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            metrics_port: parse_or(&lookup, "METRICS_PORT", defaults.metrics_port),
            run_migrations: flag_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metrics_address(&self) -> String {
        format!("{}:{}", self.host, self.metrics_port)
    }
}
