//! Manual market deployment binary.

use market_deployer::{Config, Outcome};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    info!(account = %config.account_id, rpc = %config.rpc_url, "Configuration loaded");

    match market_deployer::run(&config).await? {
        Outcome::Deployed => info!("Done"),
        Outcome::AlreadyDeployed { code_hash } => info!(%code_hash, "Nothing to do"),
    }
    Ok(())
}
