use core_config::tracing::{init_tracing, install_color_eyre};
use stores_api::{Config, build_app};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        address = %config.server.address(),
        environment = ?config.environment,
        "Starting stores API"
    );

    let app = build_app(config).await?;
    app.serve().await
}
