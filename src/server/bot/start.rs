use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, error::AppError, state::AppState};

/// Builds the Discord client with the event handler attached.
///
/// # Arguments
/// - `state` - Application state shared with the handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - The token was rejected while building the client
pub async fn init_bot(state: AppState) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_SCHEDULED_EVENTS;

    let client = Client::builder(&state.config.discord_token, intents)
        .event_handler(Handler::new(state.clone()))
        .await?;

    Ok(client)
}

/// Runs the gateway connection until it shuts down.
///
/// Should be called from within a tokio::spawn task since it only returns when the
/// connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
