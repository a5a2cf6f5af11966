use serenity::all::{
    Context, EventHandler, GuildScheduledEventUserAddEvent, GuildScheduledEventUserRemoveEvent,
    Interaction, Ready, ScheduledEvent,
};
use serenity::async_trait;

use crate::server::state::AppState;

pub mod interaction;
pub mod ready;
pub mod scheduled_event;

/// Discord bot event handler
pub struct Handler {
    pub state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called when a slash command or other interaction is received
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }

    /// Called when a user marks a scheduled event as Interested
    async fn guild_scheduled_event_user_add(
        &self,
        ctx: Context,
        subscribed: GuildScheduledEventUserAddEvent,
    ) {
        scheduled_event::handle_user_add(&self.state, ctx, subscribed).await;
    }

    /// Called when a user is no longer Interested in a scheduled event
    async fn guild_scheduled_event_user_remove(
        &self,
        ctx: Context,
        unsubscribed: GuildScheduledEventUserRemoveEvent,
    ) {
        scheduled_event::handle_user_remove(&self.state, ctx, unsubscribed).await;
    }

    /// Called when a scheduled event is edited, started, ended or canceled
    async fn guild_scheduled_event_update(&self, ctx: Context, event: ScheduledEvent) {
        scheduled_event::handle_update(&self.state, ctx, event).await;
    }

    /// Called when a scheduled event is deleted
    async fn guild_scheduled_event_delete(&self, ctx: Context, event: ScheduledEvent) {
        scheduled_event::handle_delete(&self.state, ctx, event).await;
    }
}
