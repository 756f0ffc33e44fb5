//! CLI entry point for tsauth.

pub mod auth;

use clap::{Parser, Subcommand};

/// TradeStation token helper
#[derive(Parser, Debug)]
#[command(name = "tsauth", version, about = "TradeStation OAuth token helper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the sign-in URL to open in a browser
    Url,
    /// Complete sign-in with the URL the browser was redirected to
    Callback(CallbackArgs),
    /// Show the stored token
    Status,
    /// Refresh the stored token
    Refresh(RefreshArgs),
    /// Keep the token fresh by polling on an interval
    Watch(WatchArgs),
    /// Delete the stored token
    Logout,
}

/// Arguments for `tsauth callback`.
#[derive(Parser, Debug)]
pub struct CallbackArgs {
    /// Redirect URL containing `?code=...`
    pub url: String,
}

/// Arguments for `tsauth refresh`.
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Refresh even if the token is not stale yet
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `tsauth watch`.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Seconds between polls
    #[arg(short, long, default_value_t = 10)]
    pub interval: u64,
}
