//! tsauth — OAuth2 token lifecycle for the TradeStation desktop client
//!
//! Acquires an access/refresh token pair from an authorization-code
//! redirect, keeps it in a JSON file, and refreshes it once it goes stale.
//! UI code polls [`auth::TokenManager::refresh_if_needed`] and renders
//! whatever the returned token unlocks.
//!
//! # Quick Start
//!
//! ```no_run
//! use tsauth::auth::TokenManager;
//! use tsauth::config::AuthConfig;
//!
//! # async fn example() -> Result<(), tsauth::auth::AuthError> {
//! let manager = TokenManager::from_config(&AuthConfig::from_env()?);
//! println!("Sign in at {}", manager.authorization_url());
//! manager
//!     .complete_authorization("http://localhost:3001/?code=one-time-code")
//!     .await?;
//! let _token = manager.refresh_if_needed().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;

#[cfg(feature = "cli")]
pub mod cli;
