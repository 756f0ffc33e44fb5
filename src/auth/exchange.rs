use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::AuthError;
use super::token::{AuthorizationCodeResponse, RefreshTokenResponse};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MAX_LOGGED_BODY_CHARS: usize = 512;

/// The two OAuth2 grants the lifecycle needs from the identity provider.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> Result<AuthorizationCodeResponse, AuthError>;

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshTokenResponse, AuthError>;
}

/// Confidential-client token endpoint caller.
///
/// Every call is a single form-encoded POST with no retry and no timeout
/// beyond reqwest's defaults.
///
/// # Example
/// ```no_run
/// use tsauth::auth::HttpTokenExchange;
///
/// let exchange = HttpTokenExchange::new(
///     "client-id",
///     "client-secret",
///     "http://localhost:3001",
/// )
/// .with_token_url("https://signin.tradestation.com/oauth/token");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTokenExchange {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl HttpTokenExchange {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: format!("{}oauth/token", crate::config::DEFAULT_SIGN_IN_URL),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        grant_type: &str,
        form: &[(&str, &str)],
    ) -> Result<T, AuthError> {
        let resp = self
            .client
            .post(&self.token_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .form(form)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(grant_type, error = %err, "token endpoint unreachable");
                AuthError::from(err)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body = truncate(&body, MAX_LOGGED_BODY_CHARS);
            tracing::error!(grant_type, status = status.as_u16(), body = %body, "token exchange rejected");
            return Err(AuthError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|err| {
            tracing::error!(grant_type, error = %err, "token endpoint returned an unreadable body");
            AuthError::InvalidResponse(err.to_string())
        })
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> Result<AuthorizationCodeResponse, AuthError> {
        self.post_form(
            "authorization_code",
            &[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ],
        )
        .await
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshTokenResponse, AuthError> {
        self.post_form(
            "refresh_token",
            &[
                ("grant_type", "refresh_token"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
            ],
        )
        .await
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
