//! Discord REST access used by the calendar builder.
//!
//! Scheduled events are re-fetched on every rebuild. The `EventSource` trait is the
//! seam between the calendar builder and Discord: production code goes through
//! Serenity's `Http` client via `DiscordRestClient`, so lookups share its per-route
//! rate limiting and 429 retries. Tests substitute an in-memory source.

use std::{num::NonZeroU64, sync::Arc};

use serde::de::DeserializeOwned;
use serenity::{
    all::{ChannelId, GuildId, ScheduledEventId},
    async_trait,
    http::{Http, HttpError, LightMethod, Request, Route, StatusCode},
};

use crate::server::{
    error::AppError,
    model::discord::{DiscordChannel, ScheduledEvent},
};

/// Read access to scheduled events and channel names.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetches one scheduled event.
    ///
    /// # Returns
    /// - `Ok(Some(event))` - The event exists
    /// - `Ok(None)` - Discord answered 404, the event or its guild is gone
    /// - `Err(AppError)` - Any other failure, which callers treat as transient
    async fn fetch_event(
        &self,
        guild_id: u64,
        event_id: u64,
    ) -> Result<Option<ScheduledEvent>, AppError>;

    /// Looks up a channel's display name.
    async fn channel_name(&self, channel_id: u64) -> Result<Option<String>, AppError>;
}

/// `EventSource` backed by the Discord REST API, authenticated as the bot.
pub struct DiscordRestClient {
    http: Arc<Http>,
}

impl DiscordRestClient {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Sends a GET through the rate limiter and decodes the body into our own model.
    ///
    /// Serenity's typed getters decode into its own models, which have no recurrence
    /// rule, so requests are fired by route instead.
    async fn get_json<T: DeserializeOwned>(&self, route: Route<'_>) -> Result<Option<T>, AppError> {
        match self.http.fire::<T>(Request::new(route, LightMethod::Get)).await {
            Ok(body) => Ok(Some(body)),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(response)))
                if response.status_code == StatusCode::NOT_FOUND =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl EventSource for DiscordRestClient {
    async fn fetch_event(
        &self,
        guild_id: u64,
        event_id: u64,
    ) -> Result<Option<ScheduledEvent>, AppError> {
        // Zero is never a valid snowflake, so no such event can exist.
        let (Some(guild_id), Some(event_id)) = (NonZeroU64::new(guild_id), NonZeroU64::new(event_id))
        else {
            return Ok(None);
        };

        self.get_json(Route::GuildScheduledEvent {
            guild_id: GuildId::from(guild_id),
            event_id: ScheduledEventId::from(event_id),
        })
        .await
    }

    async fn channel_name(&self, channel_id: u64) -> Result<Option<String>, AppError> {
        let Some(channel_id) = NonZeroU64::new(channel_id) else {
            return Ok(None);
        };

        let channel: Option<DiscordChannel> = self
            .get_json(Route::Channel {
                channel_id: ChannelId::from(channel_id),
            })
            .await?;

        Ok(channel.and_then(|channel| channel.name))
    }
}
