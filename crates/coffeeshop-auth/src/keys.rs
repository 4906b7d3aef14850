//! Identity provider signing keys.
//!
//! The provider publishes its public keys as a JWKS document. They are held
//! in memory as an immutable [`SigningKeySet`] snapshot behind an
//! [`ArcSwap`]: readers load the current snapshot without locking and a
//! refresh builds a complete new snapshot before swapping it in, so a request
//! never observes a half-updated key set.
//!
//! The set is fetched lazily on the first lookup. When a token names a key id
//! that is not in the current snapshot, the store re-fetches once (rotation)
//! unless another refresh happened within the configured minimum interval.
//! Concurrent misses are serialised so only one fetch is in flight.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet, KeyAlgorithm, PublicKeyUse};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use coffeeshop_observability::track_jwks_refresh;

#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("failed to fetch signing keys: {0}")]
    Http(#[from] reqwest::Error),

    #[error("signing key endpoint returned status {0}")]
    Status(u16),
}

/// Immutable snapshot of RS256 verification keys indexed by key id.
#[derive(Clone, Default)]
pub struct SigningKeySet {
    keys: HashMap<String, Arc<DecodingKey>>,
}

impl SigningKeySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Keeps only keys usable for RS256 signature verification: RSA keys with
    /// a key id, not marked for encryption and not pinned to another algorithm.
    pub fn from_jwks(jwks: &JwkSet) -> Self {
        let mut keys = HashMap::new();

        for jwk in &jwks.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                debug!("Skipping signing key without kid");
                continue;
            };
            if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
                debug!(kid = %kid, "Skipping non-RSA signing key");
                continue;
            }
            if matches!(jwk.common.public_key_use, Some(PublicKeyUse::Encryption)) {
                debug!(kid = %kid, "Skipping encryption key");
                continue;
            }
            if let Some(alg) = &jwk.common.key_algorithm
                && *alg != KeyAlgorithm::RS256
            {
                debug!(kid = %kid, alg = ?alg, "Skipping key pinned to another algorithm");
                continue;
            }

            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, Arc::new(key));
                }
                Err(e) => warn!(kid = %kid, error = %e, "Skipping unusable signing key"),
            }
        }

        Self { keys }
    }

    pub fn get(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        self.keys.get(kid).cloned()
    }

    pub fn contains(&self, kid: &str) -> bool {
        self.keys.contains_key(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for SigningKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeySet")
            .field("key_ids", &self.key_ids())
            .finish()
    }
}

/// Where the key set comes from.
#[async_trait]
pub trait JwksSource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySetError>;
}

/// The provider's JWKS discovery endpoint.
#[derive(Debug, Clone)]
pub struct RemoteJwks {
    client: reqwest::Client,
    url: String,
}

impl RemoteJwks {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl JwksSource for RemoteJwks {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(KeySetError::Status(status.as_u16()));
        }
        Ok(response.json::<JwkSet>().await?)
    }
}

/// A fixed key set, for locally managed keys and tests.
#[derive(Debug, Clone)]
pub struct StaticJwks(pub JwkSet);

#[async_trait]
impl JwksSource for StaticJwks {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        Ok(self.0.clone())
    }
}

/// Process-wide holder of the current [`SigningKeySet`].
pub struct SigningKeyStore {
    current: ArcSwap<SigningKeySet>,
    source: Arc<dyn JwksSource>,
    /// Time of the last successful fetch; the lock also serialises fetches.
    last_refresh: Mutex<Option<Instant>>,
    min_refresh_interval: Duration,
}

impl SigningKeyStore {
    pub fn new(source: Arc<dyn JwksSource>, min_refresh_interval: Duration) -> Self {
        Self {
            current: ArcSwap::from_pointee(SigningKeySet::empty()),
            source,
            last_refresh: Mutex::new(None),
            min_refresh_interval,
        }
    }

    /// Current snapshot; never blocks.
    pub fn snapshot(&self) -> Arc<SigningKeySet> {
        self.current.load_full()
    }

    /// Fetches the key set and swaps it in, regardless of the refresh interval.
    pub async fn refresh(&self) -> Result<Arc<SigningKeySet>, KeySetError> {
        let mut last_refresh = self.last_refresh.lock().await;
        let set = self.fetch_and_swap().await?;
        *last_refresh = Some(Instant::now());
        Ok(set)
    }

    /// Key for `kid`, re-fetching the set once on a miss.
    #[instrument(skip(self))]
    pub async fn decoding_key(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        if let Some(key) = self.current.load().get(kid) {
            return Some(key);
        }

        let mut last_refresh = self.last_refresh.lock().await;

        // Another request may have refreshed while we waited for the lock.
        if let Some(key) = self.current.load().get(kid) {
            return Some(key);
        }

        if let Some(at) = *last_refresh
            && at.elapsed() < self.min_refresh_interval
        {
            debug!("Key id miss within refresh interval; not re-fetching");
            return None;
        }

        match self.fetch_and_swap().await {
            Ok(set) => {
                *last_refresh = Some(Instant::now());
                set.get(kid)
            }
            Err(e) => {
                warn!(error = %e, "Signing key refresh failed");
                None
            }
        }
    }

    async fn fetch_and_swap(&self) -> Result<Arc<SigningKeySet>, KeySetError> {
        let jwks = match self.source.fetch().await {
            Ok(jwks) => jwks,
            Err(e) => {
                track_jwks_refresh(false);
                return Err(e);
            }
        };

        let set = Arc::new(SigningKeySet::from_jwks(&jwks));
        self.current.store(Arc::clone(&set));
        track_jwks_refresh(true);
        info!(keys = ?set.key_ids(), "Signing key set refreshed");
        Ok(set)
    }
}

impl std::fmt::Debug for SigningKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyStore")
            .field("current", &self.current.load_full())
            .field("min_refresh_interval", &self.min_refresh_interval)
            .finish()
    }
}
