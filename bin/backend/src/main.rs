use mentorship_net::config::BackendConfig;
use mentorship_net::server::build_backend_server;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Loading configuration...");
    let config = BackendConfig::load()?;

    build_backend_server(config).await?;
    Ok(())
}
