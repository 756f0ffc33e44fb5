//! CLI command handlers.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::auth::{TokenManager, TokenRecord};

/// Handle `tsauth url`.
pub fn handle_url(manager: &TokenManager) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔗 Sign in at: {}", manager.authorization_url());
    println!("📋 Then run: tsauth callback '<redirected URL>'");
    Ok(())
}

/// Handle `tsauth callback <url>`.
pub async fn handle_callback(
    manager: &TokenManager,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = manager.complete_authorization(url).await?;
    println!("✅ Signed in ({})", describe(&record));
    Ok(())
}

/// Handle `tsauth status`.
pub fn handle_status(manager: &TokenManager) -> Result<(), Box<dyn std::error::Error>> {
    match manager.store().load() {
        Ok(Some(record)) => {
            let state = if manager.is_expired() {
                "⚠️  Stale (refreshes on next poll)"
            } else {
                "✅ Valid"
            };
            println!("{state}: {}", describe(&record));
            if record.refresh_token.is_none() {
                println!("⚠️  No refresh token on record; sign in again to enable refresh");
            }
        }
        Ok(None) => println!("❌ Not signed in"),
        Err(e) => println!("⚠️  Error: {e}"),
    }
    Ok(())
}

/// Handle `tsauth refresh`.
pub async fn handle_refresh(
    manager: &TokenManager,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = if force {
        manager.refresh_access_token().await?
    } else {
        manager.try_refresh_if_needed().await?
    };
    match record {
        Some(record) => println!("✅ {}", describe(&record)),
        None => println!("❌ Not signed in"),
    }
    Ok(())
}

/// Handle `tsauth watch`; runs until Ctrl-C.
pub async fn handle_watch(
    manager: &TokenManager,
    interval_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match manager.refresh_if_needed().await {
                    Some(record) => tracing::info!(issued_at = ?record.issued_at, "token available"),
                    None => tracing::warn!("no token stored; run `tsauth url` to sign in"),
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

/// Handle `tsauth logout`.
pub fn handle_logout(manager: &TokenManager) -> Result<(), Box<dyn std::error::Error>> {
    manager.store().clear()?;
    println!("✅ Stored token removed");
    Ok(())
}

fn describe(record: &TokenRecord) -> String {
    let issued = record
        .issued_at
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("issued {issued}, provider lifetime {}s", record.expires_in)
}
