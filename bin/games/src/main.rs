use mentorship_net::config::GamesConfig;
use mentorship_net::server::build_games_server;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading configuration...");
    let config = GamesConfig::load()?;

    build_games_server(config).await?;
    Ok(())
}
