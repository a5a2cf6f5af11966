//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to the gateway. Besides logging, this is where
//! the slash commands are registered, scoped to a single guild during development so
//! changes show up immediately instead of after Discord's global propagation delay.

use serenity::all::{Command, Context, GuildId, Ready};

use crate::server::{bot::command, state::AppState};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Application state with the optional development guild
/// - `ctx` - Discord context used to register commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let commands = command::commands();

    let result = match state.config.dev_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, commands)
            .await
            .map(|registered| (registered.len(), format!("guild {guild_id}"))),
        None => Command::set_global_commands(&ctx.http, commands)
            .await
            .map(|registered| (registered.len(), "all guilds".to_string())),
    };

    match result {
        Ok((count, scope)) => tracing::info!("Registered {} slash commands for {}", count, scope),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
