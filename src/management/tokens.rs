use std::{collections::HashMap, sync::Arc};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::ApiError,
    management::CredentialStore,
    types::{TokenRecord, TokenResponse},
    utils,
};

/// Hands out valid access tokens for stored users, refreshing lazily.
///
/// The read-check-refresh-write sequence runs under a per-user lock, so two
/// concurrent requests racing past the same expired token trigger a single
/// upstream refresh; the second caller reuses the freshly written record.
pub struct TokenRefresher {
    store: Arc<CredentialStore>,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenRefresher {
    pub fn new(
        store: Arc<CredentialStore>,
        token_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            store,
            token_url,
            client_id,
            client_secret,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a refresher wired to the configured accounts service.
    pub fn from_config(store: Arc<CredentialStore>) -> Self {
        Self::new(
            store,
            config::spotify_apitoken_url(),
            config::spotify_client_id(),
            config::spotify_client_secret(),
        )
    }

    /// Returns a currently valid access token for `user_id`.
    ///
    /// Fails with `NoCredential` when no record exists and with
    /// `RefreshFailed` when the upstream refresh call does not succeed. A
    /// failed refresh leaves the stored record untouched, so the next
    /// request retries independently.
    pub async fn ensure_valid(&self, user_id: &str) -> Result<String, ApiError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let record = self
            .store
            .get(user_id)
            .await
            .ok_or_else(|| ApiError::NoCredential(user_id.to_string()))?;

        if utils::now_millis() < record.expires_at {
            return Ok(record.access_token);
        }

        let refreshed = self.refresh(&record).await?;
        let access_token = refreshed.access_token.clone();
        self.store
            .upsert(refreshed)
            .await
            .map_err(|e| ApiError::Store(e.to_string()))?;

        Ok(access_token)
    }

    async fn refresh(&self, record: &TokenRecord) -> Result<TokenRecord, ApiError> {
        let client = Client::new();
        let res = client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", &record.refresh_token),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;

        Ok(TokenRecord {
            user_id: record.user_id.clone(),
            access_token: token.access_token,
            // Spotify may omit the refresh token on refresh; keep the old one.
            refresh_token: token
                .refresh_token
                .unwrap_or_else(|| record.refresh_token.clone()),
            expires_at: utils::now_millis() + token.expires_in * 1000,
        })
    }

    async fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.refresh_locks.lock().await;
        // Entries only the map still references belong to finished flows;
        // dropping them here keeps the map from growing past logouts.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
