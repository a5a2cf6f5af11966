//! `/mycalendar`: hands a user the links to their personal feed.
//!
//! Discord expects an interaction response within three seconds, while rebuilding a
//! feed fetches every tracked event. The command therefore answers ephemerally right
//! away and does the rebuild and the DM in a background task.

use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage,
};
use serenity::http::HttpError;

use crate::server::{
    service::subscription::SubscriptionService,
    state::AppState,
    util::url::{feed_url, https_feed_url},
};

pub const NAME: &str = "mycalendar";

const BUILDING_MESSAGE: &str = "Building your calendar… I'll DM you the link shortly.";

pub fn register() -> CreateCommand {
    CreateCommand::new(NAME).description("Get your personal calendar feed")
}

pub async fn run(state: &AppState, ctx: Context, command: CommandInteraction) {
    let user_id = command.user.id.get();
    tracing::info!("/{} invoked by user {}", NAME, user_id);

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(BUILDING_MESSAGE)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{}: {}", NAME, e);
        return;
    }

    let state = state.clone();
    tokio::spawn(async move {
        build_and_send(state, ctx, command).await;
    });
}

async fn build_and_send(state: AppState, ctx: Context, command: CommandInteraction) {
    let user_id = command.user.id.get();

    match SubscriptionService::new(&state).prepare_feed(user_id).await {
        Ok(summary) => tracing::debug!(
            "Prepared feed for user {} ({} events)",
            user_id,
            summary.events
        ),
        // The feed file may still be stale or missing, but the link stays valid
        Err(e) => tracing::error!("Failed to prepare feed for user {}: {}", user_id, e),
    }

    let content = links_message(&state.config.base_url, user_id);

    match command
        .user
        .id
        .direct_message(&ctx, CreateMessage::new().content(content.clone()))
        .await
    {
        Ok(_) => tracing::info!("Sent calendar link to user {}", user_id),
        Err(e) if is_forbidden(&e) => {
            tracing::warn!("Cannot DM user {} (DMs disabled), replying in channel", user_id);

            let followup = CreateInteractionResponseFollowup::new()
                .content(content)
                .ephemeral(true);
            if let Err(e) = command.create_followup(&ctx.http, followup).await {
                tracing::error!("Failed to send calendar link to user {}: {}", user_id, e);
            }
        }
        Err(e) => tracing::error!("Failed to DM user {}: {}", user_id, e),
    }
}

/// Message listing both feed links.
pub fn links_message(base_url: &str, user_id: u64) -> String {
    format!(
        "Your calendar feed:\n• {}\n• {}\n\nSubscribe in your calendar app using the first link, \
         or paste the second one where webcal links are not supported.",
        feed_url(base_url, user_id),
        https_feed_url(base_url, user_id)
    )
}

fn is_forbidden(error: &serenity::Error) -> bool {
    matches!(
        error,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403
    )
}

#[cfg(test)]
mod test {
    use super::*;

    /// Tests that the DM carries the webcal and the https link.
    #[test]
    fn lists_both_links() {
        let message = links_message("https://cal.example.org", 42);

        assert!(message.contains("• webcal://cal.example.org/cal/42.ics\n"));
        assert!(message.contains("• https://cal.example.org/cal/42.ics\n"));
    }
}
