use std::sync::Arc;

use tsauth::auth::{extract_authorization_code, FileTokenStore, HttpTokenExchange, TokenManager};
use tsauth::config::{AuthConfig, TRADING_SCOPE};

fn manager(config: &AuthConfig) -> TokenManager {
    TokenManager::new(
        Arc::new(FileTokenStore::new(config.token_file.clone())),
        Arc::new(HttpTokenExchange::new("abc", "shh", config.callback_url.clone())),
        config.authorize_params(),
    )
}

#[test]
fn authorization_url_contains_required_params_in_order() {
    let config = AuthConfig::new("abc", "shh").with_callback_url("http://localhost:3001");
    let url = manager(&config).authorization_url();

    assert!(url.starts_with("https://signin.tradestation.com/authorize?"));
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    let keys: Vec<&str> = query
        .split('&')
        .filter_map(|pair| pair.split_once('=').map(|(k, _)| k))
        .collect();
    assert_eq!(
        keys,
        vec!["response_type", "client_id", "redirect_uri", "audience", "scope"]
    );
    assert!(url.contains("response_type=code"));
    assert!(url.contains("client_id=abc"));
    assert!(url.contains("redirect_uri=http://localhost:3001"));
    assert!(url.contains("audience=https://api.tradestation.com"));
    assert!(url.ends_with(&format!("scope={TRADING_SCOPE}")));
}

#[test]
fn authorization_url_is_pure() {
    let config = AuthConfig::new("abc", "shh");
    let manager = manager(&config);
    assert_eq!(manager.authorization_url(), manager.authorization_url());
}

#[test]
fn custom_sign_in_base_gets_trailing_slash() {
    let config = AuthConfig::new("abc", "shh").with_sign_in_url("https://sim-signin.example.com");
    assert!(manager(&config)
        .authorization_url()
        .starts_with("https://sim-signin.example.com/authorize?response_type=code"));
}

#[test]
fn code_extraction_follows_last_marker() {
    assert_eq!(
        extract_authorization_code("http://localhost:3001/?code=abc&scope=x"),
        Some("abc")
    );
    assert_eq!(
        extract_authorization_code("http://localhost:3001?code=one?code=two"),
        Some("two")
    );
    assert_eq!(extract_authorization_code("http://localhost:3001/"), None);
}
