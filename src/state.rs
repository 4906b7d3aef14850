use std::sync::Arc;

use anyhow::Context;
use coffeeshop_auth::{AuthGate, RemoteJwks, SigningKeyStore, TokenVerifier};
use coffeeshop_config::{AuthConfig, CorsConfig, ServerConfig};
use tracing::info;

use crate::modules::drinks::repository::{DrinkRepository, PgDrinkRepository};

#[derive(Clone)]
pub struct AppState {
    pub drinks: Arc<dyn DrinkRepository>,
    pub auth_gate: AuthGate,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        drinks: Arc<dyn DrinkRepository>,
        auth_gate: AuthGate,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            drinks,
            auth_gate,
            cors_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth_gate", &self.auth_gate)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Builds the production state: Postgres-backed drinks and an auth gate that
/// verifies tokens against the identity provider's published keys.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = coffeeshop_db::init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    if server_config.run_migrations {
        coffeeshop_db::run_migrations(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    let auth_config = AuthConfig::from_env();
    info!(
        issuer = %auth_config.issuer,
        audience = %auth_config.audience,
        jwks_url = %auth_config.jwks_url,
        "Configured identity provider"
    );

    let source = RemoteJwks::new(&auth_config.jwks_url, auth_config.jwks_timeout)
        .context("Failed to build JWKS client")?;
    let keys = SigningKeyStore::new(Arc::new(source), auth_config.jwks_min_refresh_interval);
    let auth_gate = AuthGate::new(TokenVerifier::new(Arc::new(keys), &auth_config));

    Ok(AppState::new(
        Arc::new(PgDrinkRepository::new(pool)),
        auth_gate,
        CorsConfig::from_env(),
    ))
}
