//! Local staleness policy for the stored access token.
//!
//! The provider's `expires_in` is not consulted. A token is stale once a
//! fixed window has elapsed since it was stamped, which keeps the check
//! cheap enough for hosts that poll every few seconds.

use chrono::{Duration, Utc};

use super::token::TokenRecord;

pub const DEFAULT_EXPIRY_WINDOW_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    window: Duration,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_EXPIRY_WINDOW_MINUTES))
    }
}

impl ExpiryPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether `record` is stale at `now_ms` (epoch milliseconds).
    ///
    /// A record without `issued_at` is never stale.
    pub fn is_expired_at(&self, record: &TokenRecord, now_ms: i64) -> bool {
        let Some(issued_at) = record.issued_at else {
            return false;
        };
        now_ms.saturating_sub(issued_at) > self.window.num_milliseconds()
    }

    pub fn is_expired(&self, record: &TokenRecord) -> bool {
        self.is_expired_at(record, now_millis())
    }
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
