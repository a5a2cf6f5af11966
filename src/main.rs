mod server;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::feed_refresh,
    service::discord::DiscordRestClient, startup, state::AppState,
};

const DEFAULT_LOG_FILTER: &str = "event_feed=info,serenity=warn,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    startup::prepare_data_dir(&config).await?;
    let discord_http = startup::setup_discord_http(&config)?;
    let events = Arc::new(DiscordRestClient::new(discord_http));

    let state = AppState::new(config, events);

    tracing::info!("Starting server");

    let bot_client = bot::start::init_bot(state.clone()).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Start feed refresh scheduler
    let scheduler_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = feed_refresh::start_scheduler(scheduler_state).await {
            tracing::error!("Feed refresh scheduler error: {}", e);
        }
    });

    let listener = startup::bind_listener(&state.config).await?;
    let app = router::router().with_state(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    Ok(())
}
