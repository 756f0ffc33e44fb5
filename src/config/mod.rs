//! Configuration for the token lifecycle (code > env > defaults).

use std::path::PathBuf;

use chrono::Duration;

use crate::auth::error::AuthError;
use crate::auth::expiry::DEFAULT_EXPIRY_WINDOW_MINUTES;
use crate::auth::manager::AuthorizeParams;
use crate::auth::store::DEFAULT_TOKEN_FILE;

pub const DEFAULT_SIGN_IN_URL: &str = "https://signin.tradestation.com/";
pub const DEFAULT_API_URL: &str = "https://api.tradestation.com";
pub const DEFAULT_CALLBACK_URL: &str = "http://localhost:3001";

/// Scopes requested at sign-in. `offline_access` is what yields a refresh token.
pub const TRADING_SCOPE: &str = "openid offline_access profile MarketData ReadAccount Trade";

const CLIENT_ID_VAR: &str = "TS_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "TS_CLIENT_SECRET";
const SIGN_IN_URL_VAR: &str = "TS_SIGNIN_URL";
const API_URL_VAR: &str = "TS_API_URL";
const CALLBACK_URL_VAR: &str = "TS_CALLBACK_URL";
const TOKEN_FILE_VAR: &str = "TS_TOKEN_FILE";

/// Everything the lifecycle needs to talk to the identity provider.
#[derive(Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Sign-in base URL, with trailing slash.
    pub sign_in_url: String,
    /// API base URL, sent as the `audience`.
    pub api_url: String,
    pub callback_url: String,
    pub token_file: PathBuf,
    pub expiry_window: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"..")
            .field("sign_in_url", &self.sign_in_url)
            .field("api_url", &self.api_url)
            .field("callback_url", &self.callback_url)
            .field("token_file", &self.token_file)
            .field("expiry_window", &self.expiry_window)
            .finish()
    }
}

impl AuthConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            sign_in_url: DEFAULT_SIGN_IN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            expiry_window: Duration::minutes(DEFAULT_EXPIRY_WINDOW_MINUTES),
        }
    }

    /// Load from `TS_*` environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, AuthError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let client_id = get(CLIENT_ID_VAR)
            .ok_or_else(|| AuthError::Configuration(format!("{CLIENT_ID_VAR} is not set")))?;
        let client_secret = get(CLIENT_SECRET_VAR)
            .ok_or_else(|| AuthError::Configuration(format!("{CLIENT_SECRET_VAR} is not set")))?;

        let mut config = Self::new(client_id, client_secret);
        if let Some(url) = get(SIGN_IN_URL_VAR) {
            config = config.with_sign_in_url(url);
        }
        if let Some(url) = get(API_URL_VAR) {
            config.api_url = url;
        }
        if let Some(url) = get(CALLBACK_URL_VAR) {
            config.callback_url = url;
        }
        if let Some(path) = get(TOKEN_FILE_VAR) {
            config.token_file = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Override the sign-in base; a trailing slash is added when missing.
    pub fn with_sign_in_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.sign_in_url = url;
        self
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = url.into();
        self
    }

    pub fn with_expiry_window(mut self, window: Duration) -> Self {
        self.expiry_window = window;
        self
    }

    pub fn token_url(&self) -> String {
        format!("{}oauth/token", self.sign_in_url)
    }

    pub fn authorize_params(&self) -> AuthorizeParams {
        AuthorizeParams {
            sign_in_url: self.sign_in_url.clone(),
            client_id: self.client_id.clone(),
            redirect_uri: self.callback_url.clone(),
            audience: self.api_url.clone(),
            scope: TRADING_SCOPE.to_string(),
        }
    }
}
