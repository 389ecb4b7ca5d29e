pub mod error;
pub mod models;
pub mod modules;
pub mod proxy; // Gateway service module
mod utils;

use modules::logger;
use tracing::info;

/// Load configuration, start the gateway and serve until Ctrl-C
///
/// `config_arg` overrides the config file location.
pub async fn run(config_arg: Option<String>) -> error::AppResult<()> {
    let config_path = modules::resolve_config_path(config_arg);
    let config = modules::load_app_config(&config_path)?;

    // Initialize logger; guard flushes the file writer on exit
    let _log_guard = logger::init_logger(config.log_dir.as_deref());
    info!("Loaded configuration from {:?}", config_path);
    info!(
        "Forwarding {} routes to {}",
        proxy::routes::ROUTES.len(),
        config.api_host
    );

    let state = proxy::AppState::new(&config)?;
    let (server, handle) = proxy::AxumServer::start(
        config.proxy.get_bind_address(),
        config.proxy.port,
        state,
    )
    .await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    server.stop();
    if let Err(e) = handle.await {
        tracing::error!("Gateway accept loop ended abnormally: {}", e);
    }

    Ok(())
}
