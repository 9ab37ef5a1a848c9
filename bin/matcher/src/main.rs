use mentorship_net::config::MatcherConfig;
use mentorship_net::server::build_matcher_server;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading configuration...");
    let config = MatcherConfig::load()?;

    build_matcher_server(config).await?;
    Ok(())
}
