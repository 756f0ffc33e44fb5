use serde::{Deserialize, Serialize};

/// The single persisted credential set.
///
/// `issued_at` is stamped locally in epoch milliseconds whenever the record
/// is inserted or refreshed. On disk it keeps the `timeStamp` key used by
/// earlier versions of the desktop client.
///
/// # Example
/// ```
/// use tsauth::auth::TokenRecord;
///
/// let record = TokenRecord {
///     access_token: "access".to_string(),
///     refresh_token: Some("refresh".to_string()),
///     id_token: None,
///     token_type: "Bearer".to_string(),
///     scope: Some("openid offline_access".to_string()),
///     expires_in: 1200,
///     issued_at: Some(chrono::Utc::now().timestamp_millis()),
/// };
/// assert_eq!(record.authorization_header(), "Bearer access");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(
        rename = "timeStamp",
        alias = "issued_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<i64>,
}

impl TokenRecord {
    /// Build the initial record from an authorization-code grant.
    pub fn from_authorization(response: AuthorizationCodeResponse, issued_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            id_token: response.id_token,
            token_type: response.token_type,
            scope: response.scope,
            expires_in: response.expires_in,
            issued_at: Some(issued_at),
        }
    }

    /// Fold a refresh response into this record.
    ///
    /// The refresh grant never returns a refresh token, so `refresh_token`
    /// and `scope` carry over from `self`; everything else comes from the
    /// response.
    pub fn merge_refresh(&self, response: RefreshTokenResponse, issued_at: i64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: self.refresh_token.clone(),
            id_token: response.id_token,
            token_type: response.token_type,
            scope: self.scope.clone(),
            expires_in: response.expires_in,
            issued_at: Some(issued_at),
        }
    }

    /// Value for an `Authorization` header on API calls.
    pub fn authorization_header(&self) -> String {
        let scheme = if self.token_type.trim().is_empty() {
            "Bearer"
        } else {
            self.token_type.trim()
        };
        format!("{scheme} {}", self.access_token)
    }
}

/// Token endpoint payload for `grant_type=authorization_code`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorizationCodeResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
}

/// Token endpoint payload for `grant_type=refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
}
