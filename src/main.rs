//! Bibet API Server Binary
//!
//! Boots the in-memory repositories and serves the betting API.

use bibet::api::server::ApiServer;
use bibet::auth::InMemoryCredentials;
use bibet::config::ConfigLoader;
use bibet::repository::{InMemoryBetRepository, InMemoryUserRepository};
use bibet::sports::DemoFeed;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bibet")]
#[command(about = "Bibet Betting Platform API Server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Allowed CORS origins (comma-separated, use * for all)
    #[arg(long)]
    cors_origins: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(origins) = args.cors_origins {
        config.server.cors_origins = origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();
    }

    let users = InMemoryUserRepository::new();
    let bets = InMemoryBetRepository::new();
    let credentials = InMemoryCredentials::new(config.auth.token_salt.clone());
    let feed = DemoFeed::new();

    let server = ApiServer::new(config, users, bets, credentials, feed);
    server.run().await?;

    Ok(())
}
