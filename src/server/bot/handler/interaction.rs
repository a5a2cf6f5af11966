use serenity::all::{Context, Interaction};

use crate::server::{bot::command::mycalendar, state::AppState};

/// Dispatches slash commands by name.
///
/// Other interaction kinds are ignored; the bot registers no components or modals.
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    tracing::debug!(
        "Received slash command {} from user {}",
        command.data.name,
        command.user.id
    );

    match command.data.name.as_str() {
        mycalendar::NAME => mycalendar::run(state, ctx, command).await,
        other => tracing::warn!("Unknown command received: {}", other),
    }
}
