#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use tsauth::auth::{AuthError, TokenRecord, TokenStore};
use tsauth::config::AuthConfig;

pub const CLIENT_ID: &str = "abc";
pub const CLIENT_SECRET: &str = "shh";
pub const STALE_AGE_MS: i64 = 16 * 60 * 1000;

#[derive(Default)]
pub struct InMemoryTokenStore {
    record: Mutex<Option<TokenRecord>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: TokenRecord) {
        *self.record.lock().expect("store lock poisoned") = Some(record);
    }

    pub fn get(&self) -> Option<TokenRecord> {
        self.record.lock().expect("store lock poisoned").clone()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<TokenRecord>, AuthError> {
        Ok(self.get())
    }

    fn save(&self, record: &TokenRecord) -> Result<(), AuthError> {
        self.seed(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.record.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn record(access_token: &str, refresh_token: Option<&str>, issued_at: Option<i64>) -> TokenRecord {
    TokenRecord {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(String::from),
        id_token: Some("I1".to_string()),
        token_type: "bearer".to_string(),
        scope: Some("S1".to_string()),
        expires_in: 1200,
        issued_at,
    }
}

pub fn fresh_record(access_token: &str) -> TokenRecord {
    record(access_token, Some("R1"), Some(now_ms()))
}

pub fn stale_record(access_token: &str, refresh_token: Option<&str>) -> TokenRecord {
    record(access_token, refresh_token, Some(now_ms() - STALE_AGE_MS))
}

/// Config pointing the sign-in base at a mock server and the token file into `dir`.
pub fn config_for(server_uri: &str, dir: &Path) -> AuthConfig {
    AuthConfig::new(CLIENT_ID, CLIENT_SECRET)
        .with_sign_in_url(server_uri)
        .with_token_file(dir.join("tsToken.json"))
}
