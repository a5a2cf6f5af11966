use std::{net::SocketAddr, sync::Arc, time::Duration};

use serenity::http::{Http, HttpBuilder};
use tokio::net::TcpListener;

use crate::server::{config::Config, error::AppError};

/// Builds the Serenity HTTP client used for Discord REST lookups.
///
/// Requests go through Serenity's rate limiter, which also retries 429 responses.
/// The underlying `reqwest::Client` gets a request timeout so a stalled lookup cannot
/// hold the index lock indefinitely.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and optional REST proxy
///
/// # Returns
/// - `Ok(Arc<Http>)` - Client ready to be shared
/// - `Err(AppError::ReqwestErr)` - The TLS backend could not be initialized
pub fn setup_discord_http(config: &Config) -> Result<Arc<Http>, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()?;

    let mut builder = HttpBuilder::new(&config.discord_token).client(client);
    if let Some(proxy) = &config.discord_proxy_url {
        tracing::info!("Sending Discord REST requests through {}", proxy);
        builder = builder.proxy(proxy);
    }

    Ok(Arc::new(builder.build()))
}

/// Creates the data directory holding every user's index and feed.
///
/// # Arguments
/// - `config` - Application configuration containing the data directory
///
/// # Returns
/// - `Ok(())` - Directory exists
/// - `Err(AppError::IoErr)` - Directory could not be created
pub async fn prepare_data_dir(config: &Config) -> Result<(), AppError> {
    tokio::fs::create_dir_all(&config.data_dir).await?;

    tracing::info!("Storing calendars in {}", config.data_dir.display());

    Ok(())
}

/// Binds the HTTP listener on all interfaces at the configured port.
pub async fn bind_listener(config: &Config) -> Result<TcpListener, AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("HTTP server listening on {}", addr);

    Ok(listener)
}

/// Resolves once the process receives Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }

    tracing::info!("Shutdown signal received");
}
