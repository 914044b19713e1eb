use std::sync::Arc;

use anyhow::Result;
use prompt_core::{Config, ProviderClient};
use prompt_server::{build_app, run_server, GenerationService};
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    let default_level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = ProviderClient::from_config(&config)?;
    let model = config.model();
    tracing::info!(
        provider = client.provider().display_name(),
        model = %model,
        "starting the prompt console backend"
    );

    let service = GenerationService::new(
        Arc::new(client),
        model,
        Duration::from_secs(config.rate_limit_secs),
        config.cache_capacity,
    );

    run_server(build_app(Arc::new(service)), config.port).await
}
