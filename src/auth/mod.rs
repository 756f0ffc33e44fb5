//! OAuth2 token lifecycle: storage, staleness, grant exchange and refresh.

pub mod error;
pub mod exchange;
pub mod expiry;
pub mod manager;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use exchange::{HttpTokenExchange, TokenExchange};
pub use expiry::ExpiryPolicy;
pub use manager::{extract_authorization_code, AuthorizeParams, TokenManager};
pub use store::{FileTokenStore, TokenStore};
pub use token::{AuthorizationCodeResponse, RefreshTokenResponse, TokenRecord};
