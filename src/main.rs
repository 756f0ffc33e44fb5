//! tsauth CLI binary entry point.

use clap::Parser;
use tsauth::auth::TokenManager;
use tsauth::cli::{Cli, Commands};
use tsauth::config::AuthConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tsauth=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AuthConfig::from_env()?;
    let manager = TokenManager::from_config(&config);

    match cli.command {
        Commands::Url => tsauth::cli::auth::handle_url(&manager),
        Commands::Callback(args) => tsauth::cli::auth::handle_callback(&manager, &args.url).await,
        Commands::Status => tsauth::cli::auth::handle_status(&manager),
        Commands::Refresh(args) => tsauth::cli::auth::handle_refresh(&manager, args.force).await,
        Commands::Watch(args) => tsauth::cli::auth::handle_watch(&manager, args.interval).await,
        Commands::Logout => tsauth::cli::auth::handle_logout(&manager),
    }
}
