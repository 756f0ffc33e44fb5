use std::sync::Arc;

use tokio::sync::Mutex;

use super::error::AuthError;
use super::exchange::{HttpTokenExchange, TokenExchange};
use super::expiry::{now_millis, ExpiryPolicy};
use super::store::{FileTokenStore, TokenStore};
use super::token::TokenRecord;
use crate::config::AuthConfig;

/// Query parameters for the provider's sign-in page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeParams {
    /// Sign-in base URL, with trailing slash.
    pub sign_in_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub audience: String,
    pub scope: String,
}

impl AuthorizeParams {
    /// Sign-in URL the user opens in a browser.
    ///
    /// Values are inserted as-is; the provider accepts the raw callback URL
    /// and space-separated scope.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}authorize?response_type=code&client_id={}&redirect_uri={}&audience={}&scope={}",
            self.sign_in_url, self.client_id, self.redirect_uri, self.audience, self.scope
        )
    }
}

/// Owns the single token record and keeps it fresh.
///
/// Reads, refreshes and writes are serialized behind one async mutex, so
/// concurrent pollers never race a read-then-write cycle. The host decides
/// the poll cadence; nothing here runs in the background.
///
/// # Example
/// ```no_run
/// use tsauth::auth::TokenManager;
/// use tsauth::config::AuthConfig;
///
/// # async fn example() -> Result<(), tsauth::auth::AuthError> {
/// let manager = TokenManager::from_config(&AuthConfig::from_env()?);
/// println!("Sign in at {}", manager.authorization_url());
/// if let Some(token) = manager.refresh_if_needed().await {
///     println!("{}", token.authorization_header());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TokenManager {
    store: Arc<dyn TokenStore>,
    exchange: Arc<dyn TokenExchange>,
    authorize: AuthorizeParams,
    policy: ExpiryPolicy,
    lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        store: Arc<dyn TokenStore>,
        exchange: Arc<dyn TokenExchange>,
        authorize: AuthorizeParams,
    ) -> Self {
        Self {
            store,
            exchange,
            authorize,
            policy: ExpiryPolicy::default(),
            lock: Mutex::new(()),
        }
    }

    /// Wire the JSON file store and the HTTP exchange from configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
        let exchange = Arc::new(
            HttpTokenExchange::new(
                config.client_id.clone(),
                config.client_secret.clone(),
                config.callback_url.clone(),
            )
            .with_token_url(config.token_url()),
        );
        Self::new(store, exchange, config.authorize_params())
            .with_policy(ExpiryPolicy::new(config.expiry_window))
    }

    pub fn with_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn authorization_url(&self) -> String {
        self.authorize.authorization_url()
    }

    /// Stored record as-is, without refreshing.
    pub fn current_token(&self) -> Option<TokenRecord> {
        self.store.read()
    }

    /// Whether the stored record is stale. No record means not expired.
    pub fn is_expired(&self) -> bool {
        self.store
            .read()
            .map(|record| self.policy.is_expired(&record))
            .unwrap_or(false)
    }

    /// Exchange the code carried by `callback_url` and persist the new record.
    pub async fn complete_authorization(
        &self,
        callback_url: &str,
    ) -> Result<TokenRecord, AuthError> {
        let code =
            extract_authorization_code(callback_url).ok_or(AuthError::MissingAuthorizationCode)?;

        let _guard = self.lock.lock().await;
        let response = self.exchange.exchange_authorization_code(code).await?;
        if response
            .refresh_token
            .as_deref()
            .map_or(true, |token| token.trim().is_empty())
        {
            tracing::error!("authorization response carried no refresh token, nothing stored");
            return Err(AuthError::InvalidResponse(
                "authorization response is missing refresh_token".to_string(),
            ));
        }
        let record = TokenRecord::from_authorization(response, now_millis());
        self.store.save(&record)?;
        tracing::info!("authorization complete, token stored");
        Ok(record)
    }

    /// Fire-and-forget variant of [`complete_authorization`](Self::complete_authorization)
    /// for redirect handlers that have nobody to report to.
    pub async fn handle_callback(&self, callback_url: &str) {
        if let Err(error) = self.complete_authorization(callback_url).await {
            tracing::error!(error = %error, "authorization callback failed");
        }
    }

    /// Refresh unconditionally using the stored refresh token.
    ///
    /// Without a refresh token on record this logs and hands back the
    /// current record without touching the network. A failed save surfaces
    /// as [`AuthError::Storage`] and leaves the previous file in place.
    pub async fn refresh_access_token(&self) -> Result<Option<TokenRecord>, AuthError> {
        let _guard = self.lock.lock().await;
        let current = self.store.read();
        self.refresh_locked(current).await
    }

    /// Refresh only when the stored record is stale.
    pub async fn try_refresh_if_needed(&self) -> Result<Option<TokenRecord>, AuthError> {
        let _guard = self.lock.lock().await;
        match self.store.read() {
            Some(record) if self.policy.is_expired(&record) => {
                self.refresh_locked(Some(record)).await
            }
            current => {
                tracing::debug!(present = current.is_some(), "token not expired");
                Ok(current)
            }
        }
    }

    /// Polling entry point: best available token, never an error.
    ///
    /// When a refresh fails the stored record is returned, stale or not.
    pub async fn refresh_if_needed(&self) -> Option<TokenRecord> {
        match self.try_refresh_if_needed().await {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(error = %error, "token refresh failed, using stored token");
                self.store.read()
            }
        }
    }

    async fn refresh_locked(
        &self,
        current: Option<TokenRecord>,
    ) -> Result<Option<TokenRecord>, AuthError> {
        let record = match current {
            Some(record) if record.refresh_token.is_some() => record,
            other => {
                tracing::error!(error = %AuthError::MissingRefreshToken, "skipping token refresh");
                return Ok(other);
            }
        };
        let refresh_token = record.refresh_token.as_deref().unwrap_or_default();

        tracing::info!("refreshing access token");
        let response = self.exchange.exchange_refresh_token(refresh_token).await?;
        let refreshed = record.merge_refresh(response, now_millis());
        self.store.save(&refreshed).map_err(|error| {
            tracing::error!(error = %error, "refreshed token could not be stored");
            error
        })?;
        tracing::info!(expires_in = refreshed.expires_in, "access token refreshed");
        Ok(Some(refreshed))
    }
}

/// Pull the authorization code out of a redirect URL.
///
/// The code is whatever follows the last `?code=` up to the next `&`. A URL
/// that never mentions `code` yields `None`.
pub fn extract_authorization_code(url: &str) -> Option<&str> {
    if !url.contains("code") {
        return None;
    }
    let tail = match url.rsplit_once("?code=") {
        Some((_, tail)) => tail,
        None => url,
    };
    let code = tail.split('&').next().unwrap_or(tail);
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}
